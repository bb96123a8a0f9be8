use trend_forecast::error::ForecastError;

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("Trend window must be positive".to_string());
    let error_string = format!("{}", error);

    assert!(error_string.contains("Invalid parameter"));
    assert!(error_string.contains("Trend window must be positive"));

    let error = ForecastError::InsufficientData("History is empty".to_string());
    assert_eq!(error.to_string(), "Insufficient data: History is empty");
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let forecast_error = ForecastError::from(json_error);

    match forecast_error {
        ForecastError::Serialization(message) => assert!(!message.is_empty()),
        other => panic!("Expected Serialization variant, got {:?}", other),
    }
}

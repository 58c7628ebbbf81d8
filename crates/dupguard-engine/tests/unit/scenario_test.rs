//! Review scenarios for the default token method

use dupguard_engine::similarity::token_jaccard;

const VALIDATE_EMAIL: &str = r#"def validate_email(email):
    """Validate email format."""
    pattern = r'^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$'
    return re.match(pattern, email) is not None"#;

const VALIDATE_EMAIL_ADDRESS: &str = r#"def validate_email(email_address):
    """Check the email address format."""
    pattern = r'^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$'
    return re.match(pattern, email_address) is not None"#;

const DISCOUNT: &str = r#"def calculate_discount(price, percentage):
    """Calculate discount amount."""
    if percentage < 0 or percentage > 100:
        raise ValueError("Percentage must be between 0 and 100")
    return price * (percentage / 100)"#;

const DISCOUNT_REWORDED: &str = r#"def calculate_discount(price, percentage):
    """Work out the discount."""
    if percentage < 0 or percentage > 100:
        raise ValueError("Invalid discount percentage supplied")
    return price * (percentage / 100)"#;

#[test]
fn test_email_validators_with_renamed_variable() {
    let score = token_jaccard(VALIDATE_EMAIL, VALIDATE_EMAIL_ADDRESS);
    assert!(score > 0.7, "score was {score}");
}

#[test]
fn test_discount_with_different_error_message() {
    let score = token_jaccard(DISCOUNT, DISCOUNT_REWORDED);
    assert!(score > 0.6, "score was {score}");
}

#[test]
fn test_unrelated_functions_stay_below_default_threshold() {
    let score = token_jaccard(VALIDATE_EMAIL, DISCOUNT);
    assert!(score < 0.4, "score was {score}");
}

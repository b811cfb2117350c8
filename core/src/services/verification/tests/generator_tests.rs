use crate::services::verification::{generate_otp, generate_security_code};

#[test]
fn otp_has_requested_length_and_only_digits() {
    for _ in 0..100 {
        let code = generate_otp(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn otp_length_is_configurable() {
    assert_eq!(generate_otp(4).len(), 4);
    assert_eq!(generate_otp(8).len(), 8);
}

#[test]
fn security_code_is_url_safe() {
    let code = generate_security_code(16);
    // 16 bytes of entropy encode to 22 unpadded base64 characters.
    assert_eq!(code.len(), 22);
    assert!(code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn security_codes_do_not_repeat() {
    let a = generate_security_code(16);
    let b = generate_security_code(16);
    assert_ne!(a, b);
}

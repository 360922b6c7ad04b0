//! Log-safe rendering of personal data

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the whole domain,
/// e.g. `jane.doe@example.com` becomes `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@example.com"), "j***@example.com");
        assert_eq!(mask_email("a@b.io"), "a***@b.io");
    }

    #[test]
    fn test_mask_malformed() {
        assert_eq!(mask_email("no-at-sign"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}

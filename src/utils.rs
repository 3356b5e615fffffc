// src/utils.rs

/// Mask an email for log output: keeps the first character of the local
/// part and the domain, e.g. `a***@example.com`.
pub fn anonymize_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***@***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymize_email() {
        assert_eq!(anonymize_email("alice@example.com"), "a***@example.com");
        assert_eq!(anonymize_email("x@x.com"), "x***@x.com");
    }

    #[test]
    fn test_anonymize_email_empty_local() {
        assert_eq!(anonymize_email("@example.com"), "***@example.com");
    }

    #[test]
    fn test_anonymize_email_no_at() {
        assert_eq!(anonymize_email("notanemail"), "***@***");
        assert_eq!(anonymize_email(""), "***@***");
    }

    #[test]
    fn test_anonymize_email_multibyte() {
        assert_eq!(anonymize_email("élodie@example.fr"), "é***@example.fr");
    }
}

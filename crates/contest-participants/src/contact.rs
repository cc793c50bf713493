//! Contact validation for participant identities.
//!
//! The contest core trusts every [`Identity`] it is handed. This module is
//! the provider side: it checks email and phone formats before an identity
//! is built.
//!
//! # Rules
//!
//! - **Email**: starts with an ASCII letter, has a local part of lowercase
//!   letters, digits, `.` and `_`, then `@`, then a `label.tld` domain made
//!   of lowercase letters only. An uppercase first letter passes the start
//!   check but is still refused by the local-part check.
//! - **Phone**: digits plus the separators `(`, `)`, `-`, space and `+`,
//!   with exactly 11 digits. The stored form is the bare digit string.

use contest_types::Identity;

/// Number of digits a phone number must contain.
pub const PHONE_DIGITS: usize = 11;

/// Separator characters permitted inside a phone number.
const PHONE_SEPARATORS: &[char] = &['(', ')', '-', ' ', '+'];

/// Errors raised while validating contact details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// The participant name is blank.
    #[error("name must not be empty")]
    EmptyName,

    /// The email is blank.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email does not start with an ASCII letter.
    #[error("email must start with an English letter")]
    EmailStart,

    /// The email has no `@`.
    #[error("email must contain an @")]
    MissingAt,

    /// The local part contains a forbidden character.
    #[error("only lowercase English letters, digits, '.' or '_' may appear before the @ (found {0:?})")]
    InvalidLocalChar(char),

    /// The domain part is shorter than `a.b`.
    #[error("email needs at least one letter before the '.' and one after")]
    DomainTooShort,

    /// The domain part has no `.`.
    #[error("email must have a '.' after the @")]
    DomainMissingDot,

    /// The domain part contains a forbidden character.
    #[error("only lowercase English letters and a single '.' may appear after the @ (found {0:?})")]
    InvalidDomainChar(char),

    /// The phone number is blank.
    #[error("phone number must not be empty")]
    EmptyPhone,

    /// The phone number contains a forbidden character.
    #[error("phone number may contain only digits and '+', '(', ')', '-', ' ' (found {0:?})")]
    InvalidPhoneChar(char),

    /// The phone number has the wrong number of digits.
    #[error("phone number must have exactly {PHONE_DIGITS} digits (found {digits})")]
    PhoneLength {
        /// Digits found.
        digits: usize,
    },
}

/// Validate an email address, returning it unchanged on success.
pub fn validate_email(email: &str) -> Result<String, ContactError> {
    let first = email.chars().next().ok_or(ContactError::EmptyEmail)?;
    if !first.is_ascii_alphabetic() {
        return Err(ContactError::EmailStart);
    }
    let (local, domain) = email.split_once('@').ok_or(ContactError::MissingAt)?;

    if let Some(bad) = local
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '_'))
    {
        return Err(ContactError::InvalidLocalChar(bad));
    }

    if domain.len() < 3 {
        return Err(ContactError::DomainTooShort);
    }
    let (label, tld) = domain
        .split_once('.')
        .ok_or(ContactError::DomainMissingDot)?;
    if label.is_empty() || tld.is_empty() {
        return Err(ContactError::DomainTooShort);
    }
    if let Some(bad) = label
        .chars()
        .chain(tld.chars())
        .find(|c| !c.is_ascii_lowercase())
    {
        return Err(ContactError::InvalidDomainChar(bad));
    }

    Ok(email.to_owned())
}

/// Validate a phone number and return its bare digits.
pub fn normalize_phone(phone: &str) -> Result<String, ContactError> {
    if phone.is_empty() {
        return Err(ContactError::EmptyPhone);
    }
    let mut digits = String::with_capacity(PHONE_DIGITS);
    for c in phone.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !PHONE_SEPARATORS.contains(&c) {
            return Err(ContactError::InvalidPhoneChar(c));
        }
    }
    if digits.len() != PHONE_DIGITS {
        return Err(ContactError::PhoneLength {
            digits: digits.len(),
        });
    }
    Ok(digits)
}

/// Build a validated identity from optional email and phone values.
pub fn identity(
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<Identity, ContactError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContactError::EmptyName);
    }
    let mut identity = Identity::named(name.to_owned());
    if let Some(email) = email {
        identity = identity.with_email(validate_email(email)?);
    }
    if let Some(phone) = phone {
        identity = identity.with_phone(normalize_phone(phone)?);
    }
    Ok(identity)
}

/// Build a validated identity from a single contact string.
///
/// A string containing `@` is taken as an email, anything else as a phone
/// number.
pub fn identity_from_contact(name: &str, contact: &str) -> Result<Identity, ContactError> {
    if contact.contains('@') {
        identity(name, Some(contact), None)
    } else {
        identity(name, None, Some(contact))
    }
}

//! Form validation.
//!
//! Each form type holds raw user input and converts into the request type
//! the API expects, trimming and normalizing on the way. All failing fields
//! are reported together.

use std::sync::OnceLock;

use regex::Regex;

use super::admin::{AddIpWhitelistRequest, UpdateAppSettingsRequest, UpdateEmailConfigRequest};
use super::auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest};
use super::error::ValidationErrors;

const EMAIL_MAX: usize = 255;
const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;
const APP_NAME_MAX: usize = 100;
const APP_DESCRIPTION_MAX: usize = 500;
const SMTP_HOST_MAX: usize = 255;

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
            .expect("phone pattern")
    })
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern"))
}

fn ipv4_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
        )
        .expect("ipv4 pattern")
    })
}

fn len(value: &str) -> usize {
    value.chars().count()
}

/// Trimmed, lowercased email, or records why it is invalid.
fn email(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> String {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        errors.push(field, "Email is required");
    } else if len(&value) > EMAIL_MAX {
        errors.push(field, "Email must not exceed 255 characters");
    } else if !email_pattern().is_match(&value) {
        errors.push(field, "Please enter a valid email address");
    }
    value
}

fn person_name(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> String {
    let value = raw.trim().to_string();
    if value.is_empty() {
        errors.push(field, "Name is required");
    } else if len(&value) > NAME_MAX {
        errors.push(field, "Name must not exceed 100 characters");
    } else if !name_pattern().is_match(&value) {
        errors.push(
            field,
            "Name can only contain letters, spaces, hyphens, and apostrophes",
        );
    }
    value
}

/// Optional phone; empty input means "no phone".
fn phone(errors: &mut ValidationErrors, field: &'static str, raw: Option<&str>) -> Option<String> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    if len(value) > PHONE_MAX {
        errors.push(field, "Phone number must not exceed 20 characters");
    } else if !phone_pattern().is_match(value) {
        errors.push(field, "Please enter a valid phone number");
    }
    Some(value.to_string())
}

fn strong_password(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let length = len(value);
    if length < PASSWORD_MIN {
        errors.push(field, "Password must be at least 8 characters");
    } else if length > PASSWORD_MAX {
        errors.push(field, "Password must not exceed 128 characters");
    } else if !value.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(field, "Password must contain at least one uppercase letter");
    } else if !value.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(field, "Password must contain at least one lowercase letter");
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        errors.push(field, "Password must contain at least one number");
    } else if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(
            field,
            "Password must contain at least one special character",
        );
    }
}

/// Trim, bound the length, then strip angle brackets.
fn sanitized(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
    min: usize,
    max: usize,
) -> String {
    let value = raw.trim();
    if len(value) < min {
        errors.push(field, format!("Input must be at least {min} characters"));
    } else if len(value) > max {
        errors.push(field, format!("Input must not exceed {max} characters"));
    }
    value.replace(['<', '>'], "")
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Optional full name; split into first and last name on the first
    /// whitespace.
    pub name: Option<String>,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = email(&mut errors, "email", &self.email);
        strong_password(&mut errors, "password", &self.password);
        if self.confirm_password.is_empty() {
            errors.push("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.push("confirmPassword", "Passwords don't match");
        }

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if len(name) > NAME_MAX {
            errors.push("name", "Name must not exceed 100 characters");
        }
        let (first_name, last_name) = match name.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (name.to_string(), String::new()),
        };

        errors.into_result(RegisterRequest {
            email,
            password: self.password.clone(),
            first_name,
            last_name,
            phone: None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    /// # Errors
    ///
    /// Returns the email failure, if any.
    pub fn validate(&self) -> Result<ForgotPasswordRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = email(&mut errors, "email", &self.email);
        errors.into_result(ForgotPasswordRequest { email })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl ProfileForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<UpdateProfileRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let first_name = person_name(&mut errors, "firstName", &self.first_name);
        let last_name = person_name(&mut errors, "lastName", &self.last_name);
        let phone = phone(&mut errors, "phone", self.phone.as_deref());
        errors.into_result(UpdateProfileRequest {
            first_name,
            last_name,
            phone,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppSettingsForm {
    pub app_name: String,
    pub app_description: String,
    pub maintenance_mode: bool,
    pub api_rate_limiting_enabled: bool,
}

impl AppSettingsForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<UpdateAppSettingsRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let app_name = sanitized(&mut errors, "appName", &self.app_name, 1, APP_NAME_MAX);
        let app_description = sanitized(
            &mut errors,
            "appDescription",
            &self.app_description,
            0,
            APP_DESCRIPTION_MAX,
        );
        errors.into_result(UpdateAppSettingsRequest {
            app_name: Some(app_name),
            app_description: Some(app_description),
            maintenance_mode: Some(self.maintenance_mode),
            api_rate_limiting_enabled: Some(self.api_rate_limiting_enabled),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmailConfigForm {
    pub smtp_host: String,
    /// Kept wide so out-of-range input can be reported rather than
    /// rejected at parse time.
    pub smtp_port: i64,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_email: String,
    pub email_notifications_enabled: bool,
}

impl EmailConfigForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<UpdateEmailConfigRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let smtp_host = self.smtp_host.trim().to_string();
        if smtp_host.is_empty() {
            errors.push("smtpHost", "SMTP host is required");
        } else if len(&smtp_host) > SMTP_HOST_MAX {
            errors.push("smtpHost", "SMTP host must not exceed 255 characters");
        }

        let smtp_port = match u16::try_from(self.smtp_port) {
            Ok(0) | Err(_) if self.smtp_port < 1 => {
                errors.push("smtpPort", "Port must be at least 1");
                None
            }
            Ok(port) => Some(port),
            Err(_) => {
                errors.push("smtpPort", "Port must not exceed 65535");
                None
            }
        };

        let from_email = email(&mut errors, "fromEmail", &self.from_email);

        errors.into_result(UpdateEmailConfigRequest {
            smtp_host: Some(smtp_host),
            smtp_port,
            smtp_username: self.smtp_username.clone(),
            smtp_password: self.smtp_password.clone(),
            from_email: Some(from_email),
            email_notifications_enabled: Some(self.email_notifications_enabled),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct IpWhitelistForm {
    pub ip_address: String,
    pub description: String,
}

impl IpWhitelistForm {
    /// # Errors
    ///
    /// Returns the address failure, if any.
    pub fn validate(&self) -> Result<AddIpWhitelistRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let ip_address = self.ip_address.trim().to_string();
        if !ipv4_pattern().is_match(&ip_address) {
            errors.push("ipAddress", "Please enter a valid IPv4 address");
        }
        errors.into_result(AddIpWhitelistRequest {
            ip_address,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_normalizes_email() {
        let form = LoginForm {
            email: "  Jane@Example.COM ".into(),
            password: "x".into(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, "jane@example.com");
    }

    #[test]
    fn login_reports_all_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.field("email"), Some("Email is required"));
        assert_eq!(errors.field("password"), Some("Password is required"));
    }

    #[test]
    fn signup_password_rules_in_order() {
        let cases = [
            ("Ab1!", "Password must be at least 8 characters"),
            ("abcdefg1!", "Password must contain at least one uppercase letter"),
            ("ABCDEFG1!", "Password must contain at least one lowercase letter"),
            ("Abcdefgh!", "Password must contain at least one number"),
            ("Abcdefgh1", "Password must contain at least one special character"),
        ];
        for (password, message) in cases {
            let form = SignupForm {
                email: "jane@example.com".into(),
                password: password.into(),
                confirm_password: password.into(),
                name: None,
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.field("password"), Some(message), "{password}");
        }
    }

    #[test]
    fn signup_requires_matching_confirmation() {
        let form = SignupForm {
            email: "jane@example.com".into(),
            password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pasS".into(),
            name: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("confirmPassword"), Some("Passwords don't match"));
    }

    #[test]
    fn signup_splits_name() {
        let form = SignupForm {
            email: "jane@example.com".into(),
            password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pass".into(),
            name: Some(" Jane  van Doe ".into()),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.first_name, "Jane");
        assert_eq!(request.last_name, "van Doe");
    }

    #[test]
    fn profile_rejects_digits_in_name_and_bad_phone() {
        let form = ProfileForm {
            first_name: "J4ne".into(),
            last_name: "O'Neil-Smith".into(),
            phone: Some("call me".into()),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field("firstName").is_some());
        assert!(errors.field("lastName").is_none());
        assert_eq!(errors.field("phone"), Some("Please enter a valid phone number"));
    }

    #[test]
    fn profile_treats_blank_phone_as_absent() {
        let form = ProfileForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: Some("   ".into()),
        };
        assert_eq!(form.validate().unwrap().phone, None);

        let form = ProfileForm {
            phone: Some("+1 (555) 123-4567".into()),
            ..form
        };
        assert!(form.validate().is_err());

        let form = ProfileForm {
            phone: Some("+91 9876 543210".into()),
            ..form
        };
        assert_eq!(form.validate().unwrap().phone.as_deref(), Some("+91 9876 543210"));
    }

    #[test]
    fn app_settings_strip_angle_brackets() {
        let form = AppSettingsForm {
            app_name: "  Super <b>Pi</b> ".into(),
            app_description: "Signals".into(),
            maintenance_mode: true,
            api_rate_limiting_enabled: false,
        };
        let request = form.validate().unwrap();
        assert_eq!(request.app_name.as_deref(), Some("Super bPi/b"));
        assert_eq!(request.maintenance_mode, Some(true));
    }

    #[test]
    fn app_settings_require_name() {
        let form = AppSettingsForm {
            app_name: "   ".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("appName"), Some("Input must be at least 1 characters"));
    }

    #[test]
    fn email_config_port_bounds() {
        let mut form = EmailConfigForm {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 0,
            from_email: "noreply@example.com".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("smtpPort"), Some("Port must be at least 1"));

        form.smtp_port = 70_000;
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("smtpPort"), Some("Port must not exceed 65535"));

        form.smtp_port = 587;
        assert_eq!(form.validate().unwrap().smtp_port, Some(587));
    }

    #[test]
    fn ip_whitelist_accepts_only_ipv4() {
        let ok = IpWhitelistForm {
            ip_address: " 192.168.1.10 ".into(),
            description: "office".into(),
        };
        assert_eq!(ok.validate().unwrap().ip_address, "192.168.1.10");

        for bad in ["256.1.1.1", "10.0.0", "::1", "abc"] {
            let form = IpWhitelistForm {
                ip_address: bad.into(),
                description: String::new(),
            };
            assert!(form.validate().is_err(), "{bad}");
        }
    }
}

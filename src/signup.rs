//! Controlled signup form.
//!
//! Every edit arrives as a [`FieldInput`] and goes through
//! [`SignupForm::update`], which only accepts the form's own fields.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown form field '{name}'")]
    UnknownField { name: String },

    #[error("Unknown hero class '{value}'")]
    InvalidClass { value: String },

    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("'{value}' is not an email address")]
    InvalidEmail { value: String },
}

/// One edit to one field, as produced by an input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub field_name: String,
    pub field_value: String,
}

impl FieldInput {
    pub fn new(field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_value: field_value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Email,
    Password,
    HeroClass,
}

impl SignupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Password => "password",
            SignupField::HeroClass => "heroClass",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "email" => Some(SignupField::Email),
            "password" => Some(SignupField::Password),
            "heroClass" => Some(SignupField::HeroClass),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupClass {
    #[default]
    Warrior,
    Mage,
    Ranger,
    Healer,
}

impl SignupClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupClass::Warrior => "warrior",
            SignupClass::Mage => "mage",
            SignupClass::Ranger => "ranger",
            SignupClass::Healer => "healer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignupClass::Warrior => "Warrior Scribe",
            SignupClass::Mage => "Mystic Blogger",
            SignupClass::Ranger => "Wandering Writer",
            SignupClass::Healer => "Sage Storyteller",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "warrior" => Some(SignupClass::Warrior),
            "mage" => Some(SignupClass::Mage),
            "ranger" => Some(SignupClass::Ranger),
            "healer" => Some(SignupClass::Healer),
            _ => None,
        }
    }
}

impl fmt::Display for SignupClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepted registration. The password stays behind in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub hero_class: SignupClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub hero_class: SignupClass,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single edit. Rejected edits leave the form unchanged.
    pub fn update(&mut self, input: FieldInput) -> Result<(), FormError> {
        let field = SignupField::parse(&input.field_name).ok_or(FormError::UnknownField {
            name: input.field_name.clone(),
        })?;

        match field {
            SignupField::Email => self.email = input.field_value,
            SignupField::Password => self.password = input.field_value,
            SignupField::HeroClass => {
                self.hero_class = SignupClass::parse(&input.field_value).ok_or(
                    FormError::InvalidClass {
                        value: input.field_value,
                    },
                )?;
            }
        }
        Ok(())
    }

    pub fn submit(&self) -> Result<Registration, FormError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::MissingField {
                field: SignupField::Email.as_str(),
            });
        }
        if !email.contains('@') {
            return Err(FormError::InvalidEmail {
                value: email.to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField {
                field: SignupField::Password.as_str(),
            });
        }

        tracing::info!(email, class = self.hero_class.as_str(), "Hero registered");
        Ok(Registration {
            email: email.to_string(),
            hero_class: self.hero_class,
        })
    }
}

//! Accepted shapes for the resource, login and register forms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{LoginRequest, RegisterRequest, ResourcePayload};

/// Message returned alongside field errors when a form fails validation
pub const FORM_INVALID: &str = "Please correct the highlighted fields";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResourceForm {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    #[serde(default)]
    pub title: String,

    #[validate(url(message = "Must be a valid URL"))]
    #[serde(default)]
    pub url: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "Please select a type"))]
    #[serde(rename = "type", default)]
    pub resource_type: String,

    #[serde(default)]
    pub tags: String,
}

impl ResourceForm {
    pub fn into_payload(self) -> ResourcePayload {
        ResourcePayload {
            title: self.title,
            url: self.url,
            description: self.description,
            resource_type: self.resource_type,
            tags: normalize_tags(&self.tags),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn into_request(self) -> LoginRequest {
        LoginRequest {
            identity: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Please enter a valid email"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(default, skip_serializing)]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    #[serde(rename = "passwordConfirm", default, skip_serializing)]
    pub password_confirm: String,
}

impl RegisterForm {
    pub fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            email: self.email,
            password: self.password,
            password_confirm: self.password_confirm,
        }
    }
}

/// `"a, b ,, c"` becomes `"a,b,c"`
pub fn normalize_tags(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Struct fields whose form name differs from the Rust name
const FORM_FIELD_NAMES: [(&str, &str); 2] = [
    ("resource_type", "type"),
    ("password_confirm", "passwordConfirm"),
];

/// Name a field carries in the submitted form and in backend field errors
fn form_field_name(field: &str) -> &str {
    FORM_FIELD_NAMES
        .iter()
        .find(|(rust, _)| *rust == field)
        .map(|(_, form)| *form)
        .unwrap_or(field)
}

/// First message per field, keyed by form field name
pub fn field_errors(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (form_field_name(field).to_string(), message)
            })
        })
        .collect()
}

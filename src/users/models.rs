//! User form models

use crate::common::{FormBinding, FormField, Validator};

/// Form record for `POST /user/signup`
#[derive(Debug, Default, Clone)]
pub struct UserSignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub validator: Validator,
}

impl FormBinding for UserSignupForm {
    fn fields() -> Vec<FormField<Self>> {
        vec![
            FormField::text("name", |f, v| f.name = v),
            FormField::text("email", |f, v| f.email = v),
            FormField::text("password", |f, v| f.password = v),
        ]
    }
}

/// Form record for `POST /user/login`
#[derive(Debug, Default, Clone)]
pub struct UserLoginForm {
    pub email: String,
    pub password: String,
    pub validator: Validator,
}

impl FormBinding for UserLoginForm {
    fn fields() -> Vec<FormField<Self>> {
        vec![
            FormField::text("email", |f, v| f.email = v),
            FormField::text("password", |f, v| f.password = v),
        ]
    }
}

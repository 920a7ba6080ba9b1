use crate::domain::models::user::{NewUser, UserType};

pub const DEMO_PASSWORD: &str = "123456";
pub const DEMO_CLIENT_EMAIL: &str = "demo@client.com";
pub const DEMO_PROFESSIONAL_EMAIL: &str = "demo@prof.com";

/// Accounts written on first run so the demo can be used without signing up.
pub fn demo_users() -> Vec<NewUser> {
    vec![
        NewUser {
            name: "Demo Client".to_string(),
            email: DEMO_CLIENT_EMAIL.to_string(),
            phone: "(11) 99999-9999".to_string(),
            password: DEMO_PASSWORD.to_string(),
            user_type: UserType::Client,
            profession: None,
            bio: None,
        },
        NewUser {
            name: "Demo Professional".to_string(),
            email: DEMO_PROFESSIONAL_EMAIL.to_string(),
            phone: "(11) 98888-8888".to_string(),
            password: DEMO_PASSWORD.to_string(),
            user_type: UserType::Professional,
            profession: Some("Hairdresser".to_string()),
            bio: Some("Experienced professional with 10 years in the field".to_string()),
        },
    ]
}

pub const DEFAULT_PROFESSION_LABEL: &str = "Professional";

//! Demo records inserted when a collection is read while empty

use crate::models::contact_message::{STATUS_READ, STATUS_UNREAD};
use crate::models::{ContactMessage, DayHours, SalonOwner, SalonProfile, Service, User, WorkingHours};

const DEMO_PASSWORD: &str = "password123";

fn user(username: &str, email: &str, role: &str, salon_name: Option<&str>) -> User {
    User {
        username: username.to_string(),
        email: email.to_string(),
        password: DEMO_PASSWORD.to_string(),
        role: role.to_string(),
        salon_name: salon_name.map(str::to_string),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("customer1", "customer1@example.com", "customer", None),
        user("salonowner1", "owner1@example.com", "salon_owner", Some("Beauty Salon 1")),
        user("salonowner2", "owner2@example.com", "salon_owner", Some("Glamour Studio")),
        user("admin1", "admin1@example.com", "admin", None),
    ]
}

fn owner(username: &str, email: &str, salon_name: &str) -> SalonOwner {
    SalonOwner {
        username: username.to_string(),
        email: email.to_string(),
        password: DEMO_PASSWORD.to_string(),
        salon_name: salon_name.to_string(),
    }
}

pub fn salon_owners() -> Vec<SalonOwner> {
    vec![
        owner("salonowner1", "owner1@example.com", "Beauty Salon 1"),
        owner("salonowner2", "owner2@example.com", "Glamour Studio"),
        owner("salonowner3", "owner3@example.com", "Style Hub"),
    ]
}

fn service(name: &str, price: f64, duration: &str) -> Service {
    Service {
        service_name: name.to_string(),
        price,
        duration: duration.to_string(),
    }
}

pub fn salon_profiles() -> Vec<SalonProfile> {
    vec![
        SalonProfile {
            salon_name: "Beauty Salon 1".into(),
            owner_name: "John Doe".into(),
            email: "salon1@example.com".into(),
            phone: "123-456-7890".into(),
            address: "123 Main St, City".into(),
            description: "Luxury beauty salon offering premium services".into(),
            services: vec![
                service("Haircut", 50.0, "45 min"),
                service("Manicure", 30.0, "30 min"),
                service("Pedicure", 35.0, "45 min"),
            ],
            working_hours: WorkingHours::weekly(
                DayHours::new("09:00", "18:00"),
                DayHours::new("10:00", "16:00"),
                DayHours::closed(),
            ),
        },
        SalonProfile {
            salon_name: "Glamour Studio".into(),
            owner_name: "Jane Smith".into(),
            email: "salon2@example.com".into(),
            phone: "987-654-3210".into(),
            address: "456 Oak St, Town".into(),
            description: "Modern salon specializing in hair and nail care".into(),
            services: vec![
                service("Hair Coloring", 80.0, "90 min"),
                service("Hair Styling", 45.0, "45 min"),
                service("Facial", 60.0, "60 min"),
            ],
            working_hours: WorkingHours::weekly(
                DayHours::new("10:00", "19:00"),
                DayHours::new("09:00", "17:00"),
                DayHours::closed(),
            ),
        },
    ]
}

fn message(name: &str, email: &str, subject: &str, body: &str, status: &str) -> ContactMessage {
    ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: body.to_string(),
        status: status.to_string(),
    }
}

pub fn contact_messages() -> Vec<ContactMessage> {
    vec![
        message(
            "John Smith",
            "john@example.com",
            "Booking Inquiry",
            "I would like to book an appointment for next week.",
            STATUS_UNREAD,
        ),
        message(
            "Sarah Johnson",
            "sarah@example.com",
            "Service Question",
            "Do you offer hair coloring services?",
            STATUS_READ,
        ),
        message(
            "Mike Wilson",
            "mike@example.com",
            "Price Inquiry",
            "What are your prices for a basic haircut?",
            STATUS_UNREAD,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;

    #[test]
    fn every_seed_passes_validation() {
        users().iter().try_for_each(Entity::validate).unwrap();
        salon_owners().iter().try_for_each(Entity::validate).unwrap();
        salon_profiles().iter().try_for_each(Entity::validate).unwrap();
        contact_messages().iter().try_for_each(Entity::validate).unwrap();
    }

    #[test]
    fn seed_sizes() {
        assert_eq!(User::seed_set().len(), 4);
        assert_eq!(SalonOwner::seed_set().len(), 3);
        assert_eq!(SalonProfile::seed_set().len(), 2);
        assert_eq!(ContactMessage::seed_set().len(), 3);
    }

    #[test]
    fn seeded_user_emails_are_unique() {
        let mut emails: Vec<_> = users().into_iter().map(|u| u.email).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 4);
    }

    #[test]
    fn seeded_salons_close_on_sunday() {
        for salon in salon_profiles() {
            let sunday = salon.working_hours.sunday.expect("sunday hours");
            assert!(!sunday.is_open());
        }
    }
}

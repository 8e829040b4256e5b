//! Fixed data written by `ContactService::reinitialize`.
//!
//! Contacts are inserted in declaration order, so the ids after a re-seed are
//! always Fred = 1, Wilma = 2, Barney = 3, Betty = 4.

use crate::domain::commands::{ContactFields, NewChildren};

pub struct FixtureContact {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub street: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub birthday: &'static str,
    pub hobbies: &'static [&'static str],
    pub pets: &'static [&'static str],
}

pub const FIXTURE_CONTACTS: [FixtureContact; 4] = [
    FixtureContact {
        first_name: "Fred",
        last_name: "Flintstone",
        street: "345 Cave Stone Rd",
        city: "Bedrock",
        state: "NA",
        zip: "123",
        phone: "1",
        email: "fred@bedrock.com",
        birthday: "1970-01-01",
        hobbies: &["Bowling", "Golf"],
        pets: &["Dino"],
    },
    FixtureContact {
        first_name: "Wilma",
        last_name: "Flintstone",
        street: "345 Cave Stone Rd",
        city: "Bedrock",
        state: "NA",
        zip: "123",
        phone: "1",
        email: "wilma@bedrock.com",
        birthday: "1970-02-01",
        hobbies: &["Shopping", "Cooking"],
        pets: &["Baby Puss"],
    },
    FixtureContact {
        first_name: "Barney",
        last_name: "Rubble",
        street: "123 Granite St",
        city: "Bedrock",
        state: "NA",
        zip: "123",
        phone: "2",
        email: "barney@bedrock.com",
        birthday: "1970-03-01",
        hobbies: &["Bowling"],
        pets: &["Hoppy"],
    },
    FixtureContact {
        first_name: "Betty",
        last_name: "Rubble",
        street: "123 Granite St",
        city: "Bedrock",
        state: "NA",
        zip: "123",
        phone: "2",
        email: "betty@bedrock.com",
        birthday: "1970-04-01",
        hobbies: &["Shopping", "Dancing"],
        pets: &[],
    },
];

impl FixtureContact {
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            street: Some(self.street.to_string()),
            city: Some(self.city.to_string()),
            state: Some(self.state.to_string()),
            zip: Some(self.zip.to_string()),
            phone: Some(self.phone.to_string()),
            email: Some(self.email.to_string()),
            birthday: Some(self.birthday.to_string()),
        }
    }

    pub fn children(&self) -> NewChildren {
        NewChildren {
            hobbies: self.hobbies.iter().map(|s| s.to_string()).collect(),
            pets: self.pets.iter().map(|s| s.to_string()).collect(),
        }
    }
}

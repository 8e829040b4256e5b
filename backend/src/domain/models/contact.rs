use chrono::NaiveDate;

/// A stored contact. Plain data; mutation goes through `ContactService`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
    /// `None` when the store runs without child collections
    pub children: Option<ContactChildren>,
}

/// Hobbies and pets owned by a single contact, each ordered by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactChildren {
    pub hobbies: Vec<ChildRecord>,
    pub pets: Vec<ChildRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub id: i64,
    pub contact_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Hobby,
    Pet,
}

impl ChildKind {
    pub const ALL: [ChildKind; 2] = [ChildKind::Hobby, ChildKind::Pet];

    pub fn table(self) -> &'static str {
        match self {
            ChildKind::Hobby => "hobby",
            ChildKind::Pet => "pet",
        }
    }
}

impl ContactChildren {
    pub fn of_kind(&self, kind: ChildKind) -> &[ChildRecord] {
        match kind {
            ChildKind::Hobby => &self.hobbies,
            ChildKind::Pet => &self.pets,
        }
    }

    pub fn push(&mut self, kind: ChildKind, child: ChildRecord) {
        match kind {
            ChildKind::Hobby => self.hobbies.push(child),
            ChildKind::Pet => self.pets.push(child),
        }
    }
}

/// The nine scalar fields of a contact after validation and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContact {
    pub first_name: String,
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Validated child names to insert alongside a new contact
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidChildren {
    pub hobbies: Vec<String>,
    pub pets: Vec<String>,
}

impl ValidChildren {
    pub fn names(&self, kind: ChildKind) -> &[String] {
        match kind {
            ChildKind::Hobby => &self.hobbies,
            ChildKind::Pet => &self.pets,
        }
    }
}

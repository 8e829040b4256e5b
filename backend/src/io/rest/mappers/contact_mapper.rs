use shared::{ChildDto, ContactDto, ContactForm, ContactRequest, NewChildRequest};

use crate::domain::commands::{ContactFields, NewChildren};
use crate::domain::models::{ChildRecord, Contact};

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Mapper between the `shared` wire DTOs and domain types.
///
/// Outbound conversion cannot fail. Inbound conversion only picks fields out;
/// all checking is left to the validation layer.
pub struct ContactMapper;

impl ContactMapper {
    pub fn to_dto(domain: Contact) -> ContactDto {
        let (hobbies, pets) = match domain.children {
            Some(children) => (
                Some(children.hobbies.into_iter().map(Self::to_child_dto).collect()),
                Some(children.pets.into_iter().map(Self::to_child_dto).collect()),
            ),
            None => (None, None),
        };

        ContactDto {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            street: domain.street,
            city: domain.city,
            state: domain.state,
            zip: domain.zip,
            phone: domain.phone,
            email: domain.email,
            birthday: domain.birthday.map(|d| d.format(BIRTHDAY_FORMAT).to_string()),
            hobbies,
            pets,
        }
    }

    pub fn to_dto_list(domain: Vec<Contact>) -> Vec<ContactDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    fn to_child_dto(child: ChildRecord) -> ChildDto {
        ChildDto {
            id: child.id,
            name: child.name,
        }
    }

    /// Split a JSON request into scalar fields and optional inline children
    pub fn request_to_command(request: ContactRequest) -> (ContactFields, Option<NewChildren>) {
        let children = if request.hobbies.is_none() && request.pets.is_none() {
            None
        } else {
            Some(NewChildren {
                hobbies: Self::child_names(request.hobbies),
                pets: Self::child_names(request.pets),
            })
        };

        let fields = ContactFields {
            first_name: request.first_name,
            last_name: request.last_name,
            street: request.street,
            city: request.city,
            state: request.state,
            zip: request.zip,
            phone: request.phone,
            email: request.email,
            birthday: request.birthday,
        };

        (fields, children)
    }

    pub fn form_to_command(form: ContactForm) -> ContactFields {
        ContactFields {
            first_name: form.first_name,
            last_name: form.last_name,
            street: form.street,
            city: form.city,
            state: form.state,
            zip: form.zip,
            phone: form.phone,
            email: form.email,
            birthday: form.birthday,
        }
    }

    fn child_names(children: Option<Vec<NewChildRequest>>) -> Vec<String> {
        children
            .unwrap_or_default()
            .into_iter()
            .map(|child| child.name)
            .collect()
    }
}

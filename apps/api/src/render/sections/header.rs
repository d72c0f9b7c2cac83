use crate::models::cv::{Contact, ContactInfo, Sections};
use crate::render::blocks::{Channel, ContactView, HeaderView};
use crate::render::escape::escape_opt;
use crate::render::format::contact_url;

/// Builds the header view. `None` unless a name, title or contact value is present.
pub fn header(sections: &Sections) -> Option<HeaderView> {
    let header = sections.header.get()?;

    let contacts = header
        .contact_info
        .get()
        .map(contact_views)
        .unwrap_or_default();

    let view = HeaderView {
        name: escape_opt(&header.name),
        title: escape_opt(&header.title),
        credentials: escape_opt(&header.credentials),
        contacts,
    };

    if view.name.is_none() && view.title.is_none() && view.contacts.is_empty() {
        return None;
    }
    Some(view)
}

fn channel_contact(info: &ContactInfo, channel: Channel) -> &Contact {
    match channel {
        Channel::Email => &info.email,
        Channel::Phone => &info.phone,
        Channel::Location => &info.location,
        Channel::Linkedin => &info.linkedin,
        Channel::Portfolio => &info.portfolio,
        Channel::Orcid => &info.orcid,
        Channel::Researchgate => &info.researchgate,
    }
}

fn contact_views(info: &ContactInfo) -> Vec<ContactView> {
    Channel::ALL
        .into_iter()
        .filter_map(|channel| {
            let contact = channel_contact(info, channel);
            let value = contact.value.get()?;
            Some(ContactView {
                channel,
                value: value.to_string(),
                url: contact_url(channel, value, contact.link.get()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sections(value: serde_json::Value) -> Sections {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_name_only_header() {
        let view = header(&sections(json!({"header": {"name": "Jane Doe"}}))).unwrap();
        assert_eq!(view.name.as_deref(), Some("Jane Doe"));
        assert!(view.contacts.is_empty());
    }

    #[test]
    fn test_contacts_keep_channel_order_and_skip_blank() {
        let view = header(&sections(json!({"header": {
            "name": "Jane",
            "contact_info": {
                "linkedin": {"value": "linkedin.com/in/jane"},
                "phone": {"value": "  "},
                "email": {"value": "jane@x.com"}
            }
        }})))
        .unwrap();

        let channels: Vec<Channel> = view.contacts.iter().map(|c| c.channel).collect();
        assert_eq!(channels, vec![Channel::Email, Channel::Linkedin]);
        assert_eq!(view.contact(Channel::Email).unwrap().url, None);
        assert_eq!(
            view.contact(Channel::Linkedin).unwrap().url.as_deref(),
            Some("https://linkedin.com/in/jane")
        );
    }

    #[test]
    fn test_header_without_identity_is_absent() {
        assert!(header(&sections(json!({"header": {"credentials": "PhD"}}))).is_none());
        assert!(header(&sections(json!({"header": {"name": " ", "contact_info": {}}}))).is_none());
        assert!(header(&sections(json!({}))).is_none());
    }

    #[test]
    fn test_header_text_is_escaped() {
        let view = header(&sections(json!({"header": {"name": "A_B", "title": "R&D"}}))).unwrap();
        assert_eq!(view.name.as_deref(), Some("A\\_B"));
        assert_eq!(view.title.as_deref(), Some("R\\&D"));
    }
}

use askama::Template;

use crate::ContactSubmission;

pub const CONTACT_SUBJECT: &str = "Yeni İletişim Formu Mesajı";

/// A fully rendered message ready to hand to a [`crate::MailSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub plain: String,
}

/// Contact notification HTML template; field values are HTML-escaped.
#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Contact notification plain text template
#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    phone: &'a str,
    message: &'a str,
}

pub fn render_contact_email(
    submission: &ContactSubmission,
    from: impl Into<String>,
    to: impl Into<String>,
) -> askama::Result<OutgoingEmail> {
    let html = ContactHtmlTemplate {
        name: &submission.name,
        phone: &submission.phone,
        message: &submission.message,
    }
    .render()?;

    let plain = ContactTextTemplate {
        name: &submission.name,
        phone: &submission.phone,
        message: &submission.message,
    }
    .render()?;

    Ok(OutgoingEmail {
        from: from.into(),
        to: to.into(),
        subject: CONTACT_SUBJECT.to_owned(),
        html,
        plain,
    })
}

//! Message templates for the two notifications sent per new lead.

use quick_xml::escape::escape;

/// A rendered notification with plain-text and HTML variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
  pub subject: &'static str,
  pub plain:   String,
  pub html:    String,
}

/// Acknowledgment sent to the prospect who submitted the lead.
pub fn prospect_confirmation(first_name: &str) -> Composed {
  const BODY: &str =
    "Thank you for submitting your lead. We will get back to you soon.";
  Composed {
    subject: "Lead Submission Confirmation",
    plain:   format!("Hi {first_name},\n\n{BODY}"),
    html:    format!(
      "<html><body><p>Hi {},<br><br>{BODY}</p></body></html>",
      escape(first_name)
    ),
  }
}

/// Alert sent to the internal staff recipient.
pub fn staff_alert(prospect_email: &str, first_name: &str, last_name: &str) -> Composed {
  let sentence = |first: &str, last: &str, email: &str| {
    format!(
      "A new lead has been submitted by {first} {last}. You can contact them at {email}."
    )
  };
  Composed {
    subject: "New Lead Submission",
    plain:   sentence(first_name, last_name, prospect_email),
    html:    format!(
      "<html><body><p>{}</p></body></html>",
      sentence(
        escape(first_name).as_ref(),
        escape(last_name).as_ref(),
        escape(prospect_email).as_ref(),
      )
    ),
  }
}

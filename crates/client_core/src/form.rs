use shared::{
    domain::{Attending, GuestRecord},
    protocol::RsvpSubmission,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Attending,
    PhoneNumber,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Attending => "attending",
            Field::PhoneNumber => "phone number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {}", .0.label())]
    MissingField(Field),
}

/// Which guest-count input the UI should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCountMode {
    /// No guest selected yet; the count input stays disabled until the guest
    /// picks their name from the suggestions.
    Disabled,
    /// Dropdown bounded by the invitation's allowance.
    Bounded(u32),
    /// The invitation carries no allowance; free numeric entry.
    Unbounded,
}

/// In-progress RSVP answers. Mutated field by field as the guest types,
/// validated locally before anything touches the network.
#[derive(Debug, Clone)]
pub struct RsvpForm {
    pub name: String,
    pub phone_number: String,
    pub attending: Option<Attending>,
    pub guest_count: u32,
    pub message: String,
    selected: Option<GuestRecord>,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone_number: String::new(),
            attending: None,
            guest_count: 1,
            message: String::new(),
            selected: None,
        }
    }
}

impl RsvpForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a suggestion: the name is taken from the record and the count
    /// starts over at 1. Everything else the guest already typed stays.
    pub fn select_guest(&mut self, record: &GuestRecord) {
        self.name = record.name.clone();
        self.guest_count = 1;
        self.selected = Some(record.clone());
    }

    pub fn guest_count_mode(&self) -> GuestCountMode {
        match &self.selected {
            None => GuestCountMode::Disabled,
            Some(record) => match record.max_guests {
                Some(max) => GuestCountMode::Bounded(max),
                None => GuestCountMode::Unbounded,
            },
        }
    }

    /// The options a bounded dropdown offers: exactly `1..=max`. Empty in
    /// the other modes.
    pub fn guest_count_options(&self) -> Vec<u32> {
        match self.guest_count_mode() {
            GuestCountMode::Bounded(max) => (1..=max).collect(),
            GuestCountMode::Disabled | GuestCountMode::Unbounded => Vec::new(),
        }
    }

    /// Name, attendance answer, and phone number are required; everything
    /// else is optional. Phone numbers are free-form, and a declining guest
    /// needs no count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField(Field::Name));
        }
        if self.attending.is_none() {
            return Err(ValidationError::MissingField(Field::Attending));
        }
        if self.phone_number.is_empty() {
            return Err(ValidationError::MissingField(Field::PhoneNumber));
        }
        Ok(())
    }

    /// Pure mapping to the wire payload; validates first so an incomplete
    /// form can never produce a submission.
    pub fn to_submission(&self) -> Result<RsvpSubmission, ValidationError> {
        self.validate()?;
        let attending = self
            .attending
            .ok_or(ValidationError::MissingField(Field::Attending))?;
        Ok(RsvpSubmission {
            name: self.name.clone(),
            attending,
            guests: self.guest_count.to_string(),
            phonenumber: self.phone_number.clone(),
            message: if self.message.is_empty() {
                None
            } else {
                Some(self.message.clone())
            },
        })
    }

    /// Back to the initial empty state. Called on confirmed success only;
    /// failed submissions keep the guest's input for a manual retry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

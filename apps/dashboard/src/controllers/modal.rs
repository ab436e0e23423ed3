use crate::controllers::helpers::{cycle_next, cycle_previous};
use crate::controllers::submission::SubmissionMachine;
use crate::domain::LocationSubmission;
use thiserror::Error;

pub const PROPERTY_TYPES: [&str; 4] = ["residential", "commercial", "industrial", "agricultural"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    AddLocation,
    Help,
}

impl ModalId {
    pub const ALL: [Self; 2] = [Self::AddLocation, Self::Help];

    pub const fn title(self) -> &'static str {
        match self {
            Self::AddLocation => "Add Location",
            Self::Help => "Help",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalView {
    pub visible: bool,
    pub opacity: f32,
}

impl ModalView {
    const HIDDEN: Self = Self {
        visible: false,
        opacity: 0.0,
    };
    const SHOWN: Self = Self {
        visible: true,
        opacity: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    Close,
    Cancel,
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Address,
    Latitude,
    Longitude,
    PropertyType,
    Submit,
    Cancel,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Address,
        Self::Latitude,
        Self::Longitude,
        Self::PropertyType,
        Self::Submit,
        Self::Cancel,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name *",
            Self::Address => "Address",
            Self::Latitude => "Latitude *",
            Self::Longitude => "Longitude *",
            Self::PropertyType => "Property Type",
            Self::Submit => "Submit",
            Self::Cancel => "Cancel",
        }
    }

    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Address | Self::Latitude | Self::Longitude
        )
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequired { fields: Vec<FormField> },
}

/// Raw text of the add-location form, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationForm {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    property_type: usize,
    focus: FormField,
}

impl Default for LocationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            property_type: 0,
            focus: FormField::Name,
        }
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl LocationForm {
    /// A form with the required fields typed in and everything else at its default.
    pub fn filled(name: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<LocationSubmission, ValidationError> {
        let name = self.name.trim();
        let latitude = parse_coordinate(&self.latitude);
        let longitude = parse_coordinate(&self.longitude);

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push(FormField::Name);
        }
        if latitude.is_none() {
            missing.push(FormField::Latitude);
        }
        if longitude.is_none() {
            missing.push(FormField::Longitude);
        }

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if missing.is_empty() => Ok(LocationSubmission {
                name: name.to_string(),
                address: self.address.trim().to_string(),
                latitude,
                longitude,
                property_type: self.property_type().to_string(),
            }),
            _ => Err(ValidationError::MissingRequired { fields: missing }),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn property_type(&self) -> &'static str {
        PROPERTY_TYPES[self.property_type % PROPERTY_TYPES.len()]
    }

    pub fn cycle_property_type(&mut self, forward: bool) {
        self.property_type = if forward {
            cycle_next(self.property_type, PROPERTY_TYPES.len())
        } else {
            cycle_previous(self.property_type, PROPERTY_TYPES.len())
        };
    }

    pub const fn focus(&self) -> FormField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = FormField::ALL[cycle_next(self.focus.index(), FormField::ALL.len())];
    }

    pub fn focus_previous(&mut self) {
        self.focus = FormField::ALL[cycle_previous(self.focus.index(), FormField::ALL.len())];
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Address => &self.address,
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::PropertyType => self.property_type(),
            FormField::Submit | FormField::Cancel => "",
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Address => Some(&mut self.address),
            FormField::Latitude => Some(&mut self.latitude),
            FormField::Longitude => Some(&mut self.longitude),
            FormField::PropertyType | FormField::Submit | FormField::Cancel => None,
        }
    }

    /// Types into the focused text field. Ignored on the selector and buttons.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }
}

/// Visibility of every modal plus the add-location form and its submit flow.
#[derive(Debug)]
pub struct ModalController {
    views: Vec<(ModalId, ModalView)>,
    form: LocationForm,
    submission: SubmissionMachine,
    location_session: u64,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            views: ModalId::ALL
                .iter()
                .map(|id| (*id, ModalView::HIDDEN))
                .collect(),
            form: LocationForm::default(),
            submission: SubmissionMachine::new(),
            location_session: 0,
        }
    }

    fn view_mut(&mut self, id: ModalId) -> Option<&mut ModalView> {
        self.views
            .iter_mut()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, view)| view)
    }

    pub fn view(&self, id: ModalId) -> ModalView {
        self.views
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map_or(ModalView::HIDDEN, |(_, view)| *view)
    }

    pub fn show(&mut self, id: ModalId) {
        if id == ModalId::AddLocation && !self.is_visible(id) {
            self.location_session += 1;
        }
        if let Some(view) = self.view_mut(id) {
            *view = ModalView::SHOWN;
        }
        tracing::debug!(modal = id.title(), "modal shown");
    }

    pub fn hide(&mut self, id: ModalId) {
        if let Some(view) = self.view_mut(id) {
            *view = ModalView::HIDDEN;
        }
        tracing::debug!(modal = id.title(), "modal hidden");
    }

    pub fn dismiss(&mut self, id: ModalId, trigger: DismissTrigger) {
        tracing::debug!(modal = id.title(), ?trigger, "modal dismissed");
        self.hide(id);
    }

    /// Only a click landing on the backdrop itself dismisses. Returns whether it did.
    pub fn handle_click(&mut self, id: ModalId, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop && self.is_visible(id) {
            self.dismiss(id, DismissTrigger::Backdrop);
            return true;
        }
        false
    }

    pub fn is_visible(&self, id: ModalId) -> bool {
        self.view(id).visible
    }

    /// The modal currently on screen, if any.
    pub fn active(&self) -> Option<ModalId> {
        self.views
            .iter()
            .find(|(_, view)| view.visible)
            .map(|(id, _)| *id)
    }

    /// Bumped each time the location form is opened from hidden.
    pub const fn location_session(&self) -> u64 {
        self.location_session
    }

    pub const fn form(&self) -> &LocationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LocationForm {
        &mut self.form
    }

    pub const fn submission(&self) -> &SubmissionMachine {
        &self.submission
    }

    pub fn submission_mut(&mut self) -> &mut SubmissionMachine {
        &mut self.submission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> LocationForm {
        LocationForm::filled("Home", "25.77", "-80.19")
    }

    #[test]
    fn show_and_hide_toggle_visibility_and_opacity() {
        let mut modals = ModalController::new();
        modals.show(ModalId::AddLocation);
        assert_eq!(
            modals.view(ModalId::AddLocation),
            ModalView {
                visible: true,
                opacity: 1.0
            }
        );
        assert_eq!(modals.active(), Some(ModalId::AddLocation));

        modals.hide(ModalId::AddLocation);
        assert!(!modals.is_visible(ModalId::AddLocation));
        assert_eq!(modals.view(ModalId::AddLocation).opacity, 0.0);
        assert_eq!(modals.active(), None);
    }

    #[test]
    fn reopening_the_location_form_starts_a_new_session() {
        let mut modals = ModalController::new();
        modals.show(ModalId::AddLocation);
        modals.show(ModalId::AddLocation);
        assert_eq!(modals.location_session(), 1);

        modals.hide(ModalId::AddLocation);
        modals.show(ModalId::Help);
        modals.hide(ModalId::Help);
        modals.show(ModalId::AddLocation);
        assert_eq!(modals.location_session(), 2);
    }

    #[test]
    fn only_backdrop_clicks_dismiss() {
        let mut modals = ModalController::new();
        modals.show(ModalId::Help);

        assert!(!modals.handle_click(ModalId::Help, ClickTarget::Content));
        assert!(modals.is_visible(ModalId::Help));
        assert!(modals.handle_click(ModalId::Help, ClickTarget::Backdrop));
        assert!(!modals.is_visible(ModalId::Help));
    }

    #[test]
    fn close_and_cancel_dismiss() {
        let mut modals = ModalController::new();
        for trigger in [DismissTrigger::Close, DismissTrigger::Cancel] {
            modals.show(ModalId::AddLocation);
            modals.dismiss(ModalId::AddLocation, trigger);
            assert!(!modals.is_visible(ModalId::AddLocation));
        }
    }

    #[test]
    fn valid_form_produces_submission() {
        let form = LocationForm {
            address: " 1 Ocean Dr ".to_string(),
            ..filled_form()
        };
        let Ok(location) = form.validate() else {
            panic!("form should validate");
        };
        assert_eq!(location.name, "Home");
        assert_eq!(location.address, "1 Ocean Dr");
        assert!((location.latitude - 25.77).abs() < f64::EPSILON);
        assert_eq!(location.property_type, "residential");
    }

    #[test]
    fn blank_name_or_bad_coordinates_fail_validation() {
        let blank_name = LocationForm {
            name: "   ".to_string(),
            ..filled_form()
        };
        assert_eq!(
            blank_name.validate(),
            Err(ValidationError::MissingRequired {
                fields: vec![FormField::Name]
            })
        );

        for bad in ["", "north", "NaN", "inf"] {
            let form = LocationForm {
                latitude: bad.to_string(),
                ..filled_form()
            };
            assert!(form.validate().is_err(), "latitude {bad:?} accepted");
        }
    }

    #[test]
    fn validation_message_is_user_facing() {
        let error = LocationForm::default().validate();
        let Err(error) = error else {
            panic!("empty form should not validate");
        };
        assert_eq!(error.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn focus_cycles_through_fields_and_buttons() {
        let mut form = LocationForm::default();
        form.focus_previous();
        assert_eq!(form.focus(), FormField::Cancel);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), FormField::Address);
    }

    #[test]
    fn typing_only_reaches_text_fields() {
        let mut form = LocationForm::default();
        form.insert_char('K');
        form.insert_char('B');
        form.backspace();
        assert_eq!(form.name, "K");

        while form.focus() != FormField::PropertyType {
            form.focus_next();
        }
        form.insert_char('x');
        form.cycle_property_type(true);
        assert_eq!(form.property_type(), "commercial");
        form.cycle_property_type(false);
        form.cycle_property_type(false);
        assert_eq!(form.value(FormField::PropertyType), "agricultural");
    }

    #[test]
    fn reset_clears_form() {
        let mut form = filled_form();
        form.focus_next();
        form.reset();
        assert_eq!(form, LocationForm::default());
    }
}

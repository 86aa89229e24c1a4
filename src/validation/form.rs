use super::field::{FieldKind, Verdict};

/// Identifies a field within a record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Host,
    Ip,
    Alias,
    Preference,
    Txt,
    Value,
    Ttl,
}

impl FieldId {
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Host => "Host",
            FieldId::Ip => "IP address",
            FieldId::Alias => "Alias",
            FieldId::Preference => "Preference",
            FieldId::Txt => "Text",
            FieldId::Value => "Value",
            FieldId::Ttl => "TTL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: FieldId,
    pub kind: FieldKind,
    pub value: String,
    pub verdict: Verdict,
    /// Set once the user has edited the field; untouched invalid fields are
    /// not highlighted.
    pub touched: bool,
}

impl FormField {
    pub fn new(id: FieldId, kind: FieldKind) -> Self {
        let value = String::new();
        Self {
            id,
            kind,
            verdict: kind.validate(&value),
            value,
            touched: false,
        }
    }

    pub fn show_invalid(&self) -> bool {
        self.touched && !self.verdict.is_valid()
    }
}

/// A set of fields guarded by one submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
    submit_enabled: bool,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            focus: 0,
            submit_enabled: false,
        };
        evaluate(&mut form);
        form
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            let len = self.fields.len();
            self.focus = (self.focus + len - 1) % len;
        }
    }

    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
            field.value = value.into();
            field.touched = true;
        }
        evaluate(self);
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
            field.touched = true;
        }
        evaluate(self);
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
            field.touched = true;
        }
        evaluate(self);
    }

    /// Marks every field as touched so that all failures are shown.
    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }
}

/// Re-validates every field and enables submission iff none is invalid.
///
/// Run after each edit and again right before a submit, so a stale gate
/// never lets an invalid form through.
pub fn evaluate(form: &mut Form) -> bool {
    for field in &mut form.fields {
        field.verdict = field.kind.validate(&field.value);
    }
    form.submit_enabled = form.fields.iter().all(|f| f.verdict.is_valid());
    form.submit_enabled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_form() -> Form {
        Form::new(vec![
            FormField::new(FieldId::Name, FieldKind::Hostname),
            FormField::new(FieldId::Ip, FieldKind::Ipv4),
            FormField::new(FieldId::Ttl, FieldKind::Ttl),
        ])
    }

    #[test]
    fn test_empty_form_is_disabled() {
        let form = a_form();
        assert!(!form.submit_enabled());
        // Nothing is highlighted before the user types.
        assert!(form.fields().iter().all(|f| !f.show_invalid()));
    }

    #[test]
    fn test_gate_opens_when_all_fields_valid() {
        let mut form = a_form();
        form.set_value(FieldId::Name, "www");
        assert!(!form.submit_enabled());

        form.set_value(FieldId::Ip, "5.6.7.8");
        assert!(form.submit_enabled());

        form.set_value(FieldId::Ttl, "30");
        assert!(!form.submit_enabled());

        form.set_value(FieldId::Ttl, "");
        assert!(form.submit_enabled());
    }

    #[test]
    fn test_evaluate_catches_stale_gate() {
        let mut form = a_form();
        form.set_value(FieldId::Name, "www");
        form.set_value(FieldId::Ip, "5.6.7.8");
        assert!(form.submit_enabled());

        // Mutate behind the gate's back, as a stale view would.
        form.fields[1].value = "999.1.1.1".to_string();
        assert!(form.submit_enabled());
        assert!(!evaluate(&mut form));
        assert!(!form.submit_enabled());
        assert_eq!(form.fields()[1].verdict, Verdict::Invalid);
    }

    #[test]
    fn test_typing_into_focused_field() {
        let mut form = a_form();
        for c in "www".chars() {
            form.push_char(c);
        }
        form.focus_next();
        for c in "1.2.3.44".chars() {
            form.push_char(c);
        }
        form.pop_char();

        assert_eq!(form.value(FieldId::Name), "www");
        assert_eq!(form.value(FieldId::Ip), "1.2.3.4");
        assert!(form.submit_enabled());

        form.focus_previous();
        form.focus_previous();
        assert_eq!(form.focused().map(|f| f.id), Some(FieldId::Ttl));
    }

    #[test]
    fn test_touched_invalid_field_is_shown() {
        let mut form = a_form();
        form.set_value(FieldId::Ip, "1.2.3");
        assert!(form.fields()[1].show_invalid());
        assert!(!form.fields()[0].show_invalid());

        form.touch_all();
        assert!(form.fields()[0].show_invalid());
    }
}

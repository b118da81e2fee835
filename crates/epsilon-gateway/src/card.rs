use std::fmt;

/// Credit card supplied by the caller for a single purchase.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub number: String,
    /// Expiry month, 1 through 12.
    pub month: u8,
    /// Four-digit expiry year.
    pub year: u16,
    pub first_name: String,
    pub last_name: String,
    pub verification_value: Option<String>,
}

impl CreditCard {
    pub fn new(
        number: impl Into<String>,
        month: u8,
        year: u16,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            month,
            year,
            first_name: first_name.into(),
            last_name: last_name.into(),
            verification_value: None,
        }
    }

    pub fn with_verification_value(mut self, value: impl Into<String>) -> Self {
        self.verification_value = Some(value.into());
        self
    }

    /// Holder name as printed on the card ("FIRST LAST").
    pub fn name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Expiry month zero-padded to two digits.
    pub fn expiry_month(&self) -> String {
        format!("{:02}", self.month)
    }

    pub fn expiry_year(&self) -> String {
        self.year.to_string()
    }

    pub fn has_valid_month(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    /// Card number with everything but the last four digits masked.
    pub fn masked_number(&self) -> String {
        let digits = self.number.chars().count();
        let visible = digits.min(4);
        let tail: String = self.number.chars().skip(digits - visible).collect();
        format!("{}{}", "*".repeat(digits - visible), tail)
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &self.masked_number())
            .field("month", &self.month)
            .field("year", &self.year)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field(
                "verification_value",
                &self.verification_value.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CreditCard {
        CreditCard::new("4242424242424242", 3, 2030, "Taro", "Yamada")
            .with_verification_value("123")
    }

    #[test]
    fn debug_masks_number_and_cvv() {
        let out = format!("{:?}", card());
        assert!(out.contains("************4242"));
        assert!(!out.contains("4242424242424242"));
        assert!(!out.contains("123\""));
        assert!(out.contains("[REDACTED]"));
    }

    #[test]
    fn expiry_month_is_zero_padded() {
        assert_eq!(card().expiry_month(), "03");
        assert_eq!(card().expiry_year(), "2030");
    }

    #[test]
    fn name_joins_first_and_last() {
        assert_eq!(card().name(), "Taro Yamada");
        assert_eq!(CreditCard::new("1", 1, 2030, "", "Yamada").name(), "Yamada");
    }

    #[test]
    fn month_range() {
        assert!(card().has_valid_month());
        assert!(!CreditCard::new("1", 0, 2030, "a", "b").has_valid_month());
        assert!(!CreditCard::new("1", 13, 2030, "a", "b").has_valid_month());
    }

    #[test]
    fn short_numbers_are_not_padded() {
        assert_eq!(CreditCard::new("12", 1, 2030, "a", "b").masked_number(), "12");
    }
}

/// Charging network operators the rubrics know about. Anything else is
/// scored with the generic defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Tesla,
    ChargePoint,
    ElectrifyAmerica,
    Other,
}

impl Operator {
    /// Identifies the operator by substring of the company name, in the same
    /// order the rubrics check them.
    pub fn from_name(company: &str) -> Self {
        if company.contains("Tesla") {
            Operator::Tesla
        } else if company.contains("ChargePoint") {
            Operator::ChargePoint
        } else if company.contains("Electrify America") {
            Operator::ElectrifyAmerica
        } else {
            Operator::Other
        }
    }

    pub fn strengths(self) -> Vec<String> {
        let list: &[&str] = match self {
            Operator::Tesla => &["Proprietary network", "Fast charging", "Brand loyalty"],
            Operator::ChargePoint => &["Network size", "Software platform", "B2B focus"],
            Operator::ElectrifyAmerica => &["VW backing", "High-power charging", "Coast-to-coast"],
            Operator::Other => &[],
        };
        list.iter().map(|s| s.to_string()).collect()
    }

    pub fn market_position(self) -> &'static str {
        match self {
            Operator::Tesla => "Market Leader",
            Operator::ChargePoint => "Network Operator",
            Operator::ElectrifyAmerica => "Infrastructure Builder",
            Operator::Other => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_operators_by_substring() {
        assert_eq!(Operator::from_name("Tesla Supercharger"), Operator::Tesla);
        assert_eq!(Operator::from_name("ChargePoint Holdings"), Operator::ChargePoint);
        assert_eq!(Operator::from_name("Electrify America LLC"), Operator::ElectrifyAmerica);
        assert_eq!(Operator::from_name("EVgo"), Operator::Other);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Operator::from_name("tesla"), Operator::Other);
    }

    #[test]
    fn unknown_operator_has_no_strengths() {
        assert!(Operator::Other.strengths().is_empty());
        assert_eq!(Operator::Other.market_position(), "Unknown");
        assert_eq!(Operator::Tesla.strengths().len(), 3);
    }
}

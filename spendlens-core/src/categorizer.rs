//! Keyword-rule categorizer for transaction descriptions.
//!
//! Rules live in one ordered table; earlier groups take precedence over
//! later ones.

use crate::transaction::Category;

/// Ordered rule table. First group with a matching keyword wins, so a
/// description containing both "uber" and "bill" lands in Transport.
pub const RULES: &[(Category, &[&str])] = &[
    (Category::Food, &["zomato", "swiggy", "restaurant"]),
    (Category::Transport, &["uber", "ola", "fuel", "petrol"]),
    (Category::Utilities, &["electricity", "bill", "internet"]),
    (Category::Shopping, &["amazon", "flipkart", "shopping", "big bazaar"]),
    (Category::Salary, &["salary", "income"]),
    (Category::Entertainment, &["netflix"]),
];

/// Categorize a description. Case-insensitive substring match against the
/// rule table; `Other` when nothing matches. Pure and total.
pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();

    for (category, keywords) in RULES {
        if keywords.iter().any(|k| desc.contains(k)) {
            return *category;
        }
    }

    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_food() {
        assert_eq!(categorize("Zomato order lunch"), Category::Food);
        assert_eq!(categorize("SWIGGY DELIVERY"), Category::Food);
        assert_eq!(categorize("Beachside restaurant"), Category::Food);
    }

    #[test]
    fn test_categorize_transport() {
        assert_eq!(categorize("Uber ride to airport"), Category::Transport);
        assert_eq!(categorize("petrol pump refill"), Category::Transport);
    }

    #[test]
    fn test_categorize_utilities() {
        assert_eq!(categorize("Electricity board payment"), Category::Utilities);
        assert_eq!(categorize("broadband internet renewal"), Category::Utilities);
    }

    #[test]
    fn test_categorize_shopping() {
        assert_eq!(categorize("AMAZON marketplace"), Category::Shopping);
        assert_eq!(categorize("Big Bazaar groceries"), Category::Shopping);
    }

    #[test]
    fn test_categorize_salary() {
        assert_eq!(categorize("Salary credit March"), Category::Salary);
        assert_eq!(categorize("interest income"), Category::Salary);
    }

    #[test]
    fn test_categorize_entertainment() {
        assert_eq!(categorize("NETFLIX.COM subscription"), Category::Entertainment);
    }

    #[test]
    fn test_categorize_default_other() {
        assert_eq!(categorize("Flight tickets"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_precedence_earliest_group_wins() {
        // "uber" (Transport) beats "bill" (Utilities): Transport is listed first
        assert_eq!(categorize("uber trip on phone bill"), Category::Transport);
        // "restaurant" (Food) beats "bill" (Utilities)
        assert_eq!(categorize("restaurant bill"), Category::Food);
    }

    #[test]
    fn test_categorize_idempotent() {
        let d = "Uber ride";
        assert_eq!(categorize(d), categorize(d));
    }
}

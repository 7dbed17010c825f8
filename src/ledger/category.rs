/// Suggested category names offered by entry forms. The store does not
/// enforce this set; edited rows may carry any non-empty string.
pub const DEFAULT_CATEGORIES: [&str; 26] = [
    "Bank Balance",
    "Cable TV",
    "Car Insurance",
    "Car Payment",
    "Condo Fees",
    "Credit Card",
    "Debts",
    "Education",
    "Electricity",
    "Entertainment",
    "Extras",
    "Gas",
    "Groceries",
    "Gym",
    "Housekeeper",
    "Internet",
    "Investments",
    "Personal Care",
    "Phone",
    "Property Tax",
    "Rent",
    "Restaurants",
    "Salary/Receipts",
    "Travel",
    "Vehicle Tax",
    "Water",
];

/// Whether a category belongs to the suggested set.
pub fn is_known(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

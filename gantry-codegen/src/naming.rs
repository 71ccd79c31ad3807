//! Naming helpers for generated identifiers and paths.

/// Convert a name to PascalCase (e.g. "order_item" -> "OrderItem").
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a name to camelCase (e.g. "OrderItem" -> "orderItem").
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a name to kebab-case (e.g. "OrderItem" -> "order-item").
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if c == '_' || c == ' ' {
            result.push('-');
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
        assert_eq!(to_pascal_case("order-item"), "OrderItem");
        assert_eq!(to_pascal_case("User"), "User");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("User"), "user");
        assert_eq!(to_camel_case("OrderItem"), "orderItem");
        assert_eq!(to_camel_case("order_item"), "orderItem");
    }

    #[test]
    fn kebab_case() {
        assert_eq!(to_kebab_case("User"), "user");
        assert_eq!(to_kebab_case("OrderItem"), "order-item");
        assert_eq!(to_kebab_case("order_item"), "order-item");
    }
}

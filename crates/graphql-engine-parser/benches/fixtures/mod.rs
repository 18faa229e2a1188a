pub const SIMPLE_QUERY: &str = include_str!("simple_query.graphql");
pub const COMPLEX_QUERY: &str = include_str!("complex_query.graphql");

/// A query nesting `depth` selection sets, one field each.
pub fn deep_query(depth: usize) -> String {
    format!("{}leaf{}", "{ node ".repeat(depth), " }".repeat(depth))
}

/// A shorthand query selecting `width` aliased fields with arguments.
pub fn wide_query(width: usize) -> String {
    let fields: String = (0..width)
        .map(|i| format!("  f{i}: field(id: {i}, name: \"n{i}\") {{ id }}\n"))
        .collect();
    format!("{{\n{fields}}}\n")
}

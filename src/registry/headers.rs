/// Column titles shared by every generated table, in render order.
pub static HEADERS: [&str; 5] = ["Company", "Position", "Location", "Posting", "Age"];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_order() {
        assert_eq!(
            HEADERS.to_vec(),
            vec!["Company", "Position", "Location", "Posting", "Age"]
        );
    }
}

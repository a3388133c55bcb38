pub fn normalize(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// Width of `s` in characters, not bytes.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

pub fn fill(c: char, n: usize) -> String {
    std::iter::repeat(c).take(n).collect()
}

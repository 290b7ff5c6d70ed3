/// Index of the story the reader is currently in.
///
/// That is the last story whose top offset is at or above the header
/// boundary (`scroll_top + header_height`). When no story has reached the
/// boundary yet the first story is active. `None` only for an empty panel.
///
/// Offsets of stories that are not laid out are `None` and never qualify.
pub fn active_index(offsets: &[Option<f64>], scroll_top: f64, header_height: f64) -> Option<usize> {
    if offsets.is_empty() {
        return None;
    }
    let boundary = scroll_top + header_height;
    let last = offsets
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, offset)| offset.filter(|top| *top <= boundary).map(|_| i));
    Some(last.unwrap_or(0))
}

//! Tooltip text layout.

use tetherstone_core::BlockPos;

/// Greedy word wrap to at most `width` characters per line.
///
/// Words longer than `width` are split. A zero width disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        if !text.trim().is_empty() {
            lines.push(text.trim().to_string());
        }
        return lines;
    }

    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Line naming the bound block.
pub fn target_line(pos: BlockPos) -> String {
    format!("Target: {}, {}, {}", pos.x, pos.y, pos.z)
}

//! Placeholder substitution
//!
//! A placeholder is a run of at least [`MIN_RUN`] identical characters on a
//! template line. The value for it comes from a method chain evaluated
//! against a [`ValueMap`] and is fitted into exactly the run's width.

use super::template::{Align, InsertOption};
use crate::foundation::math::parse_leading_float;
use crate::view::{ValueMap, View};

/// Shortest run of a placeholder character that counts as a field
pub const MIN_RUN: usize = 3;

/// Method that rounds the running value to an integer
pub const ROUND_METHOD: &str = "round";

/// Evaluate a method chain.
///
/// The first method is the base key (missing keys give `""`). Every further
/// method either rounds the running value (`round`) or appends `.method` to
/// the key and replaces the running value when the extended key exists.
pub fn resolve_method_chain(map: &ValueMap, methods: &[String]) -> String {
    let Some((base, refinements)) = methods.split_first() else {
        return String::new();
    };

    let mut key = base.clone();
    let mut current = map.get(&key).unwrap_or_default().to_string();
    for method in refinements {
        if method == ROUND_METHOD {
            current = format!("{:.0}", parse_leading_float(&current).round());
        } else {
            key.push('.');
            key.push_str(method);
            if let Some(value) = map.get(&key) {
                current = value.to_string();
            }
        }
    }
    current
}

/// Fit `value` into a field of `width` cells: truncate when too long, pad
/// according to `align` when too short.
pub fn fit_field(value: &str, width: usize, align: Align) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().take(width).collect();
    }

    let pad = width - len;
    let (left, right) = match align {
        Align::Start => (0, pad),
        Align::End => (pad, 0),
        Align::Middle => (pad / 2, pad - pad / 2),
    };
    let mut field = String::with_capacity(value.len() + pad);
    field.extend(std::iter::repeat(' ').take(left));
    field.push_str(value);
    field.extend(std::iter::repeat(' ').take(right));
    field
}

/// Replace the first placeholder run on the option's line with `value`.
///
/// Only the first run of at least [`MIN_RUN`] characters is replaced; later
/// runs on the same line stay as they are. Shorter runs are literal text.
/// Returns whether a replacement happened.
pub fn apply_insert(view: &mut View, option: &InsertOption, value: &str) -> bool {
    let Some(line) = view.line(option.line) else {
        log::trace!("Insert target line {} outside template", option.line);
        return false;
    };

    let chars: Vec<char> = line.text().chars().collect();
    let mut index = 0;
    while index < chars.len() {
        if chars[index] != option.placeholder {
            index += 1;
            continue;
        }
        let start = index;
        while index < chars.len() && chars[index] == option.placeholder {
            index += 1;
        }
        let width = index - start;
        if width >= MIN_RUN {
            let mut text: String = chars[..start].iter().collect();
            text.push_str(&fit_field(value, width, option.align));
            text.extend(&chars[index..]);
            return view.set_line_text(option.line, text);
        }
    }
    false
}

/// Evaluate and apply every insert option in order
pub fn apply_inserts(view: &mut View, inserts: &[InsertOption], map: &ValueMap) {
    for option in inserts {
        let value = resolve_method_chain(map, &option.methods);
        apply_insert(view, option, &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(line: usize, placeholder: char, align: Align, methods: &[&str]) -> InsertOption {
        InsertOption {
            line,
            placeholder,
            align,
            methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn methods(names: &[&str]) -> Vec<String> {
        names.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_name_field_start_aligned() {
        let mut view = View::from_lines(["Name: ####"]);
        let map: ValueMap = [("hero_name", "Ato")].into_iter().collect();
        let opt = option(0, '#', Align::Start, &["hero_name"]);

        apply_inserts(&mut view, std::slice::from_ref(&opt), &map);
        assert_eq!(view.line(0).unwrap().text(), "Name: Ato ");
    }

    #[test]
    fn test_middle_alignment_puts_odd_space_right() {
        assert_eq!(fit_field("Ato", 4, Align::Middle), "Ato ");
        assert_eq!(fit_field("Ato", 6, Align::Middle), " Ato  ");
        assert_eq!(fit_field("Ato", 7, Align::Middle), "  Ato  ");
    }

    #[test]
    fn test_fit_field_rules() {
        assert_eq!(fit_field("Ato", 5, Align::Start), "Ato  ");
        assert_eq!(fit_field("Ato", 5, Align::End), "  Ato");
        assert_eq!(fit_field("Atomic", 4, Align::End), "Atom");
        assert_eq!(fit_field("", 3, Align::Start), "   ");
        // Width is counted in code points
        assert_eq!(fit_field("äöü", 4, Align::Start), "äöü ");
        assert_eq!(fit_field("äöüß", 2, Align::Start), "äö");
    }

    #[test]
    fn test_short_runs_are_literal() {
        let mut view = View::from_lines(["## x ##"]);
        let opt = option(0, '#', Align::Start, &["k"]);
        assert!(!apply_insert(&mut view, &opt, "value"));
        assert_eq!(view.line(0).unwrap().text(), "## x ##");
    }

    #[test]
    fn test_first_qualifying_run_after_short_run() {
        let mut view = View::from_lines(["## ####"]);
        let opt = option(0, '#', Align::End, &["k"]);
        assert!(apply_insert(&mut view, &opt, "7"));
        assert_eq!(view.line(0).unwrap().text(), "##    7");
    }

    #[test]
    fn test_only_first_run_replaced_per_call() {
        let mut view = View::from_lines(["[###] [###]"]);
        let opt = option(0, '#', Align::Start, &["k"]);

        assert!(apply_insert(&mut view, &opt, "ab"));
        assert_eq!(view.line(0).unwrap().text(), "[ab ] [###]");

        // A second call reaches the next run
        assert!(apply_insert(&mut view, &opt, "cd"));
        assert_eq!(view.line(0).unwrap().text(), "[ab ] [cd ]");
    }

    #[test]
    fn test_out_of_range_line_is_ignored() {
        let mut view = View::from_lines(["###"]);
        let opt = option(3, '#', Align::Start, &["k"]);
        assert!(!apply_insert(&mut view, &opt, "x"));
        assert_eq!(view.line(0).unwrap().text(), "###");
    }

    #[test]
    fn test_multibyte_placeholder_and_suffix() {
        let mut view = View::from_lines(["→ ●●●● ←"]);
        let opt = option(0, '●', Align::End, &["k"]);
        assert!(apply_insert(&mut view, &opt, "ü"));
        assert_eq!(view.line(0).unwrap().text(), "→    ü ←");
    }

    #[test]
    fn test_method_chain_base_and_missing() {
        let map: ValueMap = [("gold", "120")].into_iter().collect();
        assert_eq!(resolve_method_chain(&map, &methods(&["gold"])), "120");
        assert_eq!(resolve_method_chain(&map, &methods(&["silver"])), "");
        assert_eq!(resolve_method_chain(&map, &[]), "");
    }

    #[test]
    fn test_method_chain_dotted_refinement_is_cumulative() {
        let map: ValueMap = [
            ("hero", "Ato"),
            ("hero.weapon", "Sword"),
            ("hero.weapon.name", "Rusty Sword"),
        ]
        .into_iter()
        .collect();

        assert_eq!(resolve_method_chain(&map, &methods(&["hero", "weapon"])), "Sword");
        assert_eq!(
            resolve_method_chain(&map, &methods(&["hero", "weapon", "name"])),
            "Rusty Sword"
        );
        // Missing refinement keeps the running value
        assert_eq!(resolve_method_chain(&map, &methods(&["hero", "armor"])), "Ato");
    }

    #[test]
    fn test_method_chain_round() {
        let map: ValueMap = [("hp", "41.5"), ("mp", "-2.5"), ("name", "Ato"), ("stat.avg", "3.49x")]
            .into_iter()
            .collect();

        assert_eq!(resolve_method_chain(&map, &methods(&["hp", "round"])), "42");
        assert_eq!(resolve_method_chain(&map, &methods(&["mp", "round"])), "-3");
        assert_eq!(resolve_method_chain(&map, &methods(&["name", "round"])), "0");
        assert_eq!(resolve_method_chain(&map, &methods(&["stat", "avg", "round"])), "3");
    }
}

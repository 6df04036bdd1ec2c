//! Definition-name normalization
//!
//! Population criteria refer to CQL definitions by a camel-cased key. The
//! casing rules match the ones the measure UI applies, so
//! `"Initial Population"`, `"initial population"` and `"InitialPopulation"`
//! all become `"initialPopulation"`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

fn classify(ch: char) -> Option<CharClass> {
    if ch.is_numeric() {
        Some(CharClass::Digit)
    } else if ch.is_uppercase() {
        Some(CharClass::Upper)
    } else if ch.is_alphabetic() {
        Some(CharClass::Lower)
    } else {
        None
    }
}

/// Split text into words.
///
/// Non-alphanumeric characters separate words and apostrophes are dropped.
/// Inside an alphanumeric run a new word starts at a lower-to-upper
/// transition (`fooBar`), before the last capital of an acronym that runs
/// into a lowercase word (`XMLParser`), and between letters and digits.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().filter(|ch| !matches!(ch, '\'' | '\u{2019}')).collect();
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<CharClass> = None;

    for (index, &ch) in chars.iter().enumerate() {
        let Some(class) = classify(ch) else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        };

        let starts_word = match (previous, class) {
            (Some(CharClass::Lower), CharClass::Upper) => true,
            (Some(CharClass::Upper), CharClass::Upper) => {
                chars.get(index + 1).copied().and_then(classify) == Some(CharClass::Lower)
            }
            (Some(CharClass::Digit), CharClass::Digit) => false,
            (Some(CharClass::Digit), _) | (Some(_), CharClass::Digit) => true,
            _ => false,
        };

        if starts_word && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        previous = Some(class);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert text to lower camel case: the first word lowercased, every
/// following word lowercased with its first character uppercased.
pub fn camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for (index, word) in words(input).iter().enumerate() {
        let word = word.to_lowercase();
        if index == 0 {
            result.push_str(&word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Initial Population", "initialPopulation")]
    #[case("initial population", "initialPopulation")]
    #[case("InitialPopulation", "initialPopulation")]
    #[case("  Denominator Exclusions  ", "denominatorExclusions")]
    #[case("SDE Ethnicity", "sdeEthnicity")]
    #[case("XMLParser", "xmlParser")]
    #[case("fooBAR", "fooBar")]
    #[case("Patient's Age", "patientsAge")]
    #[case("Measure Population-Exclusions", "measurePopulationExclusions")]
    #[case("Qualifying Encounters 2", "qualifyingEncounters2")]
    #[case("covid19vaccine", "covid19Vaccine")]
    #[case("A1c", "a1C")]
    #[case("Boolean", "boolean")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_camel_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(camel_case(input), expected);
    }

    #[test]
    fn test_words() {
        assert_eq!(words("SDE Payer"), vec!["SDE", "Payer"]);
        assert_eq!(words("fooBarBaz"), vec!["foo", "Bar", "Baz"]);
        assert_eq!(words("__a__b__"), vec!["a", "b"]);
    }
}

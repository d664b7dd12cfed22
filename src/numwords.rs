//! English cardinal numbers written out in words, as they show up in
//! bulletin distance phrases (`FIVE MILE BERTH`, `TWO POINT FIVE MILES`).

#[derive(Clone, Copy, Debug, PartialEq)]
enum Word {
    Unit,
    Teen,
    Ten,
    Hundred,
    Scale,
}

fn small_value(word: &str) -> Option<u64> {
    let value = match word {
        "ZERO" => 0,
        "ONE" => 1,
        "TWO" => 2,
        "THREE" => 3,
        "FOUR" => 4,
        "FIVE" => 5,
        "SIX" => 6,
        "SEVEN" => 7,
        "EIGHT" => 8,
        "NINE" => 9,
        "TEN" => 10,
        "ELEVEN" => 11,
        "TWELVE" => 12,
        "THIRTEEN" => 13,
        "FOURTEEN" => 14,
        "FIFTEEN" => 15,
        "SIXTEEN" => 16,
        "SEVENTEEN" => 17,
        "EIGHTEEN" => 18,
        "NINETEEN" => 19,
        "TWENTY" => 20,
        "THIRTY" => 30,
        "FORTY" => 40,
        "FIFTY" => 50,
        "SIXTY" => 60,
        "SEVENTY" => 70,
        "EIGHTY" => 80,
        "NINETY" => 90,
        _ => return None,
    };
    Some(value)
}

fn scale_value(word: &str) -> Option<u64> {
    match word {
        "THOUSAND" => Some(1_000),
        "MILLION" => Some(1_000_000),
        _ => None,
    }
}

/// Parses a spelled-out number such as `TWENTY-FIVE`, `ONE HUNDRED AND TEN`
/// or `TWO POINT FIVE`. Case is ignored. Any word that is not part of a
/// number makes the whole phrase unparseable.
pub fn parse_spelled_number(phrase: &str) -> Option<f64> {
    let phrase = phrase.to_uppercase();
    let words: Vec<&str> = phrase
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .collect();

    let (whole, fraction) = match words.iter().position(|w| *w == "POINT") {
        Some(at) => (&words[..at], Some(&words[at + 1..])),
        None => (&words[..], None),
    };

    let whole = if whole.is_empty() {
        // "POINT FIVE" on its own still reads as a number
        if fraction.is_none() {
            return None;
        }
        0
    } else {
        parse_whole(whole)?
    };

    match fraction {
        Some(digits) => {
            if digits.is_empty() {
                return None;
            }
            let mut decimal = format!("{}.", whole);
            for digit in digits {
                match small_value(digit) {
                    Some(d) if d < 10 => decimal.push_str(&d.to_string()),
                    _ => return None,
                }
            }
            decimal.parse().ok()
        }
        None => Some(whole as f64),
    }
}

fn parse_whole(words: &[&str]) -> Option<u64> {
    let mut total = 0u64;
    let mut current = 0u64;
    let mut prev: Option<Word> = None;

    for &word in words {
        if word == "AND" {
            if prev.is_none() {
                return None;
            }
            continue;
        }

        if word == "HUNDRED" {
            if current == 0 || current >= 100 {
                return None;
            }
            current *= 100;
            prev = Some(Word::Hundred);
            continue;
        }

        if let Some(scale) = scale_value(word) {
            if current == 0 {
                return None;
            }
            total += current * scale;
            current = 0;
            prev = Some(Word::Scale);
            continue;
        }

        let value = small_value(word)?;
        let kind = match value {
            0..=9 => Word::Unit,
            10..=19 => Word::Teen,
            _ => Word::Ten,
        };

        match (prev, kind) {
            (Some(Word::Unit), _) | (Some(Word::Teen), _) => return None,
            (Some(Word::Ten), Word::Teen) | (Some(Word::Ten), Word::Ten) => return None,
            _ => (),
        }

        current += value;
        prev = Some(kind);
    }

    prev.map(|_| total + current)
}

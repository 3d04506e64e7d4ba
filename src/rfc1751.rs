//! RFC1751 English-word encoding of 64-bit blocks
//!
//! Each 8-byte block becomes six words of 11 bits each. The 66th and 65th
//! bits carry a parity over the 64 data bits, taken as the sum of its 2-bit
//! pairs. A parity mismatch on decode is reported through
//! [`Decoded::parity_error`] rather than as an error.

mod words;

use words::{SHORT_WORDS, WORDS};

use crate::error::{Result, XrpError};

const BLOCK_BYTES: usize = 8;
const WORDS_PER_BLOCK: usize = 6;

/// Result of decoding a phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub bytes: Vec<u8>,
    /// Set when any block's parity bits disagree with its data
    pub parity_error: bool,
}

fn parity(block: u64) -> u128 {
    let mut sum = 0u64;
    for i in 0..32 {
        sum += (block >> (2 * i)) & 0b11;
    }
    (sum & 0b11) as u128
}

/// Encode one 64-bit block as six words
pub fn encode_block(block: u64) -> [&'static str; WORDS_PER_BLOCK] {
    let bits = ((block as u128) << 2) | parity(block);
    let mut out = [""; WORDS_PER_BLOCK];
    for (i, word) in out.iter_mut().enumerate() {
        let index = (bits >> (66 - 11 * (i + 1))) & 0x7FF;
        *word = WORDS[index as usize];
    }
    out
}

/// Decode six words into a block, returning it with a parity-error flag
pub fn decode_block(words: &[&str]) -> Result<(u64, bool)> {
    if words.len() != WORDS_PER_BLOCK {
        return Err(XrpError::InvalidWordCount(WORDS_PER_BLOCK));
    }
    let mut bits = 0u128;
    for word in words {
        bits = (bits << 11) | word_index(word)? as u128;
    }
    let block = (bits >> 2) as u64;
    Ok((block, parity(block) != bits & 0b11))
}

/// Encode bytes whose length is a multiple of 8
pub fn encode(bytes: &[u8]) -> Result<String> {
    if bytes.len() % BLOCK_BYTES != 0 {
        return Err(XrpError::InvalidWordCount(BLOCK_BYTES));
    }
    let phrase = bytes
        .chunks_exact(BLOCK_BYTES)
        .flat_map(|chunk| {
            let mut block = [0u8; BLOCK_BYTES];
            block.copy_from_slice(chunk);
            encode_block(u64::from_be_bytes(block))
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(phrase)
}

/// Decode a whitespace-separated phrase of 6 words per 8-byte block
pub fn decode(phrase: &str) -> Result<Decoded> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.is_empty() || words.len() % WORDS_PER_BLOCK != 0 {
        return Err(XrpError::InvalidWordCount(WORDS_PER_BLOCK));
    }
    let mut bytes = Vec::with_capacity(words.len() / WORDS_PER_BLOCK * BLOCK_BYTES);
    let mut parity_error = false;
    for chunk in words.chunks_exact(WORDS_PER_BLOCK) {
        let (block, bad) = decode_block(chunk)?;
        bytes.extend_from_slice(&block.to_be_bytes());
        parity_error |= bad;
    }
    Ok(Decoded {
        bytes,
        parity_error,
    })
}

/// Dictionary index of a word, after the RFC's standardization
/// (uppercase, `1` read as `L`, `0` as `O`, `5` as `S`)
fn word_index(word: &str) -> Result<usize> {
    let normalized: String = word
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            '1' => 'L',
            '0' => 'O',
            '5' => 'S',
            other => other,
        })
        .collect();
    let found = match normalized.len() {
        1..=3 => WORDS[..SHORT_WORDS]
            .binary_search(&normalized.as_str())
            .ok(),
        4 => WORDS[SHORT_WORDS..]
            .binary_search(&normalized.as_str())
            .ok()
            .map(|i| i + SHORT_WORDS),
        _ => None,
    };
    found.ok_or_else(|| XrpError::UnknownWord(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_test_vectors() {
        let cases = [
            ("EB33F77EE73D4053", "TIDE ITCH SLOW REIN RULE MOT"),
            (
                "CCAC2AED591056BE4F90FD441C534766",
                "RASH BUSH MILK LOOK BAD BRIM AVID GAFF BAIT ROT POD LOVE",
            ),
            (
                "EFF81F9BFBC65350920CDD7416DE8009",
                "TROD MUTE TAIL WARM CHAR KONG HAAG CITY BORE O TEAL AWL",
            ),
        ];
        for (key, phrase) in cases {
            let bytes = hex::decode(key).unwrap();
            assert_eq!(encode(&bytes).unwrap(), phrase);
            let decoded = decode(phrase).unwrap();
            assert_eq!(decoded.bytes, bytes);
            assert!(!decoded.parity_error);
        }
    }

    #[test]
    fn decode_is_case_insensitive() {
        let decoded = decode("tide itch slow rein rule mot").unwrap();
        assert_eq!(hex::encode_upper(decoded.bytes), "EB33F77EE73D4053");
    }

    #[test]
    fn parity_mismatch_is_reported_not_raised() {
        // Swapping the last word keeps every word valid but breaks parity
        let decoded = decode("TIDE ITCH SLOW REIN RULE MOW").unwrap();
        assert!(decoded.parity_error);
    }

    #[test]
    fn unknown_word_is_an_error() {
        assert_eq!(
            decode("TIDE ITCH SLOW REIN RULE XYZZY"),
            Err(XrpError::UnknownWord("XYZZY".to_string()))
        );
        assert!(matches!(
            decode("TIDE ITCH SLOW"),
            Err(XrpError::InvalidWordCount(6))
        ));
        assert!(encode(&[1, 2, 3]).is_err());
    }

    #[test]
    fn dictionary_sections_are_sorted() {
        assert!(WORDS[..SHORT_WORDS].windows(2).all(|w| w[0] < w[1]));
        assert!(WORDS[SHORT_WORDS..].windows(2).all(|w| w[0] < w[1]));
        assert!(WORDS[SHORT_WORDS..].iter().all(|w| w.len() == 4));
    }
}

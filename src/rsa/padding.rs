// Block Framing and Space Padding
// Splits plaintext into fixed-size blocks and pads the final one with spaces

use std::borrow::Cow;

use super::bigint::RsaBigInt;
use super::error::{RsaError, RsaResult};

/// Separator written after every encrypted block
pub const DELIMITER: char = '/';

/// Byte appended to a short final block
pub const PAD_BYTE: u8 = b' ';

/// How plaintext is cut into blocks
///
/// `block_char_len` below is always `modulus_bits / 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockLayout {
    /// Full blocks carry `block_char_len - 1` bytes but the cursor advances
    /// by `block_char_len`, so one byte after every full block is dropped.
    /// The final block is padded to `block_char_len` bytes and decoded blocks
    /// lose their leading zero bytes.
    Legacy,
    /// Every block, including the padded final one, carries exactly
    /// `block_char_len - 1` bytes and decoded blocks are restored to that width.
    #[default]
    Contiguous,
}

/// Block geometry for one modulus and layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    /// Bytes of plaintext placed in a full block
    pub take: usize,
    /// Bytes the cursor advances after a full block
    pub stride: usize,
    /// Length the final block is padded to
    pub pad_to: usize,
    pub layout: BlockLayout,
}

/// Number of plaintext characters the modulus is sized for
pub fn block_char_len(modulus: &RsaBigInt) -> usize {
    (modulus.bits() / 8) as usize
}

impl BlockPlan {
    pub fn new(modulus: &RsaBigInt, layout: BlockLayout) -> RsaResult<Self> {
        let k = block_char_len(modulus);
        if k < 2 {
            return Err(RsaError::ModulusTooSmall(modulus.bits()));
        }

        let plan = match layout {
            BlockLayout::Legacy => Self {
                take: k - 1,
                stride: k,
                pad_to: k,
                layout,
            },
            BlockLayout::Contiguous => Self {
                take: k - 1,
                stride: k - 1,
                pad_to: k - 1,
                layout,
            },
        };
        Ok(plan)
    }

    /// Exact byte width of a decoded block, when the layout restores it
    pub fn decoded_width(&self) -> Option<usize> {
        match self.layout {
            BlockLayout::Legacy => None,
            BlockLayout::Contiguous => Some(self.take),
        }
    }

    /// Cut `plaintext` into blocks, padding a short tail with spaces
    pub fn split<'a>(&self, plaintext: &'a [u8]) -> Vec<Cow<'a, [u8]>> {
        let mut blocks = Vec::with_capacity(plaintext.len() / self.stride + 1);
        let mut rest = plaintext;

        while rest.len() >= self.stride {
            blocks.push(Cow::Borrowed(&rest[..self.take]));
            rest = &rest[self.stride..];
        }

        if !rest.is_empty() {
            let mut last = rest.to_vec();
            last.resize(self.pad_to, PAD_BYTE);
            blocks.push(Cow::Owned(last));
        }

        blocks
    }

    /// Number of spaces the final block of a `plaintext_len` input receives
    pub fn padding_len(&self, plaintext_len: usize) -> usize {
        match plaintext_len % self.stride {
            0 => 0,
            rest => self.pad_to - rest,
        }
    }
}

/// Number of spaces `encode` appends for a plaintext of `plaintext_len` bytes
pub fn padding_len(
    plaintext_len: usize,
    modulus: &RsaBigInt,
    layout: BlockLayout,
) -> RsaResult<usize> {
    Ok(BlockPlan::new(modulus, layout)?.padding_len(plaintext_len))
}

/// Split '/'-delimited ciphertext into decimal tokens, dropping the empty
/// token after the final delimiter
pub fn split_ciphertext(text: &str) -> impl Iterator<Item = &str> {
    let body = text.strip_suffix(DELIMITER).unwrap_or(text);
    let empty = text.is_empty();
    body.split(DELIMITER).filter(move |_| !empty)
}

/// Remove exactly `pad` trailing spaces, leaving the text untouched if they
/// are not all present
pub fn strip_padding(text: &str, pad: usize) -> &str {
    let bytes = text.as_bytes();
    if pad > bytes.len() || !bytes[bytes.len() - pad..].iter().all(|&b| b == PAD_BYTE) {
        return text;
    }
    &text[..text.len() - pad]
}

/// Remove trailing spaces that may have been added as padding.
///
/// At most `pad_to - 1` spaces can come from padding, so longer runs keep
/// their excess. Spaces the plaintext itself ended with are indistinguishable
/// from padding and are removed as well.
pub fn trim_trailing_padding<'a>(
    plaintext: &'a [u8],
    modulus: &RsaBigInt,
    layout: BlockLayout,
) -> RsaResult<&'a [u8]> {
    let max_pad = BlockPlan::new(modulus, layout)?.pad_to - 1;
    let spaces = plaintext.iter().rev().take_while(|&&b| b == PAD_BYTE).count();
    Ok(&plaintext[..plaintext.len() - spaces.min(max_pad)])
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2^120 has 121 bits, so block_char_len is 15
    fn modulus_121_bits() -> RsaBigInt {
        RsaBigInt::from(1u8) << 120u32
    }

    #[test]
    fn test_block_char_len() {
        assert_eq!(block_char_len(&modulus_121_bits()), 15);
        assert_eq!(block_char_len(&(RsaBigInt::from(1u8) << 2047u32)), 256);
    }

    #[test]
    fn test_contiguous_split() {
        let plan = BlockPlan::new(&modulus_121_bits(), BlockLayout::Contiguous).unwrap();
        let input = b"abcdefghijklmnopqrstuvwxyz0123";

        let blocks = plan.split(input);
        assert_eq!(blocks.len(), 3);
        assert_eq!(&*blocks[0], b"abcdefghijklmn");
        assert_eq!(&*blocks[1], b"opqrstuvwxyz01");
        assert_eq!(&*blocks[2], b"23            ");
        assert_eq!(plan.padding_len(input.len()), 12);
    }

    #[test]
    fn test_legacy_split_skips_a_byte() {
        let plan = BlockPlan::new(&modulus_121_bits(), BlockLayout::Legacy).unwrap();
        let input = b"abcdefghijklmnopqrstuvwxyz0123";

        let blocks = plan.split(input);
        assert_eq!(blocks.len(), 2);
        // 'o' and '3' are consumed but never encrypted
        assert_eq!(&*blocks[0], b"abcdefghijklmn");
        assert_eq!(&*blocks[1], b"pqrstuvwxyz012");
        assert_eq!(plan.padding_len(input.len()), 0);
    }

    #[test]
    fn test_one_short_of_a_block_is_single_padded_block() {
        for layout in [BlockLayout::Legacy, BlockLayout::Contiguous] {
            let plan = BlockPlan::new(&modulus_121_bits(), layout).unwrap();
            let input = vec![b'x'; plan.stride - 1];

            let blocks = plan.split(&input);
            assert_eq!(blocks.len(), 1);
            assert_eq!(blocks[0].len(), plan.pad_to);
            assert_eq!(*blocks[0].last().unwrap(), PAD_BYTE);
            assert_eq!(plan.padding_len(input.len()), plan.pad_to - input.len());
        }
    }

    #[test]
    fn test_exact_multiple_adds_no_block() {
        let plan = BlockPlan::new(&modulus_121_bits(), BlockLayout::Contiguous).unwrap();
        let input = vec![b'y'; plan.stride * 3];
        assert_eq!(plan.split(&input).len(), 3);
        assert_eq!(plan.padding_len(input.len()), 0);
    }

    #[test]
    fn test_empty_input() {
        let plan = BlockPlan::new(&modulus_121_bits(), BlockLayout::Contiguous).unwrap();
        assert!(plan.split(b"").is_empty());
        assert_eq!(plan.padding_len(0), 0);
    }

    #[test]
    fn test_modulus_too_small() {
        let n = RsaBigInt::from(3233u32);
        assert_eq!(
            BlockPlan::new(&n, BlockLayout::Contiguous),
            Err(RsaError::ModulusTooSmall(12))
        );
    }

    #[test]
    fn test_split_ciphertext() {
        assert_eq!(split_ciphertext("1/22/333/").collect::<Vec<_>>(), ["1", "22", "333"]);
        assert_eq!(split_ciphertext("1/22").collect::<Vec<_>>(), ["1", "22"]);
        assert_eq!(split_ciphertext("4//5/").collect::<Vec<_>>(), ["4", "", "5"]);
        assert_eq!(split_ciphertext("").count(), 0);
    }

    #[test]
    fn test_strip_padding() {
        assert_eq!(strip_padding("hello   ", 3), "hello");
        assert_eq!(strip_padding("hello   ", 2), "hello ");
        assert_eq!(strip_padding("hello", 2), "hello");
        assert_eq!(strip_padding("hi", 5), "hi");
        assert_eq!(strip_padding("hi", 0), "hi");
    }

    #[test]
    fn test_trim_trailing_padding() {
        fn trim(bytes: &[u8]) -> &[u8] {
            trim_trailing_padding(bytes, &modulus_121_bits(), BlockLayout::Contiguous).unwrap()
        }

        assert_eq!(trim(b"hello         "), b"hello");
        assert_eq!(trim(b"no padding"), b"no padding");
        assert_eq!(trim(b"caf\xe9   "), b"caf\xe9");
        // 13 spaces at most can be padding for a 14-byte block
        let long = format!("x{}", " ".repeat(20));
        assert_eq!(trim(long.as_bytes()), format!("x{}", " ".repeat(7)).as_bytes());
    }
}

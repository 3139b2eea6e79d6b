use chumsky::prelude::*;

use crate::{
    model::{BoardFile, BoardRank, Square},
    notation::{Parsable, Prs},
};

impl Parsable for BoardFile {
    fn parser<'s>() -> impl Prs<'s, Self> {
        one_of("abcdefgh").map(|c: char| Self::from_u8(c as u8 - b'a'))
    }
}

impl Parsable for BoardRank {
    fn parser<'s>() -> impl Prs<'s, Self> {
        one_of("12345678").map(|c: char| Self::from_u8(c as u8 - b'1'))
    }
}

impl Parsable for Square {
    fn parser<'s>() -> impl Prs<'s, Self> {
        BoardFile::parser()
            .then(BoardRank::parser())
            .map(|(f, r)| Self::from_parts(f, r))
    }
}

#[test]
fn test_square_parser() {
    use strum::VariantArray;
    for sq in Square::VARIANTS.iter().copied() {
        let sqs = sq.to_string();
        assert_eq!(Square::parse_exact(&sqs), Some(sq), "unable to parse {sqs}");
    }
    assert_eq!(Square::parse_exact("i1"), None);
    assert_eq!(Square::parse_exact("a9"), None);
    assert_eq!(Square::parse_exact("A1"), None);
    assert_eq!(Square::parse_exact("e44"), None);
}

//! The model cursor: an absolute offset kept in step with the token stream's split point.

use crate::stream::TokenStream;

/// Absolute offset plus the offset within the token at the stream's split point.
///
/// Canonical form: `within` is smaller than the current token's length, or the stream is split at
/// its end and `within == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) offset: usize,
    pub(crate) within: usize,
}

impl Cursor {
    /// Move by `delta` characters, walking exactly the tokens crossed.
    ///
    /// # Panics
    ///
    /// Panics if the target falls outside `[0, stream.len()]`.
    pub(crate) fn move_by(&mut self, stream: &mut TokenStream, delta: isize) {
        let target = self
            .offset
            .checked_add_signed(delta)
            .filter(|target| *target <= stream.len());
        let Some(target) = target else {
            panic!(
                "cursor move by {delta} from {} leaves the document (length {})",
                self.offset,
                stream.len()
            );
        };

        while target < stream.split_offset() {
            stream.step_backward();
        }
        while let Some(token) = stream.current() {
            if target < stream.split_offset() + token.len {
                break;
            }
            stream.step_forward();
        }

        self.offset = target;
        self.within = target - stream.split_offset();
    }

    /// Move to an absolute offset.
    pub(crate) fn set_absolute(&mut self, stream: &mut TokenStream, offset: usize) {
        assert!(
            offset <= stream.len(),
            "cursor offset {offset} outside the document (length {})",
            stream.len()
        );
        self.move_by(stream, offset as isize - self.offset as isize);
    }

    /// Re-anchor the cursor at the start of the token at the stream's split point.
    pub(crate) fn place_at_split(&mut self, stream: &TokenStream) {
        self.offset = stream.split_offset();
        self.within = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_text;

    fn setup(text: &str) -> (TokenStream, Cursor) {
        let mut stream = TokenStream::new();
        stream.splice(0..0, lex_text(text));
        (stream, Cursor::default())
    }

    #[test]
    fn moves_land_in_containing_token() {
        let (mut stream, mut cursor) = setup("abc{de}");
        cursor.move_by(&mut stream, 2);
        assert_eq!(stream.split(), 0);
        assert_eq!(cursor.within, 2);

        cursor.move_by(&mut stream, 1);
        assert_eq!(stream.split(), 1);
        assert_eq!(cursor.within, 0);
        assert_eq!(cursor.offset, 3);

        cursor.move_by(&mut stream, 4);
        assert_eq!(cursor.offset, 7);
        assert_eq!(stream.split(), 4);
        assert_eq!(cursor.within, 0);
        assert!(stream.current().is_none());
    }

    #[test]
    fn moving_back_and_forth_restores_position() {
        let (mut stream, mut cursor) = setup("x /* y */ {\n}\n");
        cursor.set_absolute(&mut stream, 5);
        let before = (cursor, stream.split());

        cursor.move_by(&mut stream, 7);
        cursor.move_by(&mut stream, -7);
        assert_eq!((cursor, stream.split()), before);
    }

    #[test]
    #[should_panic(expected = "leaves the document")]
    fn moving_before_start_panics() {
        let (mut stream, mut cursor) = setup("abc");
        cursor.move_by(&mut stream, -1);
    }

    #[test]
    #[should_panic(expected = "outside the document")]
    fn absolute_past_end_panics() {
        let (mut stream, mut cursor) = setup("abc");
        cursor.set_absolute(&mut stream, 4);
    }
}

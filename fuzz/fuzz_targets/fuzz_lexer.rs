#![no_main]
use arbitrary::Arbitrary;
use lexbuf::{Chunked, Lexer, LexerOptions, Source};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Peek(u8),
    Codepoint(u8),
    Advance(u8),
    Back(u8),
    Mark,
    Rewind,
    Shift,
    Skip,
    Release,
}

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    cuts: Vec<u8>,
    buffer_size: u8,
    adopt: bool,
    ops: Vec<Op>,
}

fn chunks<'a>(data: &'a [u8], cuts: &[u8]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    let mut rest = data;
    for &cut in cuts {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + usize::from(cut) % rest.len());
        out.push(head);
        rest = tail;
    }
    out.push(rest);
    out
}

fn run(input: &Input) {
    let data = input.data.as_slice();
    let options = LexerOptions {
        buffer_size: usize::from(input.buffer_size),
        adopt_source_bytes: input.adopt,
    };
    if input.adopt {
        check(Lexer::with_options(data, options), data, &input.ops);
    } else {
        let source = Chunked::new(chunks(data, &input.cuts));
        check(Lexer::with_options(source, options), data, &input.ops);
    }
}

/// Replays `ops` against a model of the cursor over `data`.
fn check<S: Source>(mut lexer: Lexer<S>, data: &[u8], ops: &[Op]) {
    let (mut start, mut pos) = (0usize, 0usize);
    let mut mark = None;
    let mut committed = 0usize;
    let mut reported = 0usize;

    for op in ops {
        match *op {
            Op::Peek(n) => {
                let n = usize::from(n);
                let expected = data.get(pos + n).copied().unwrap_or(0);
                assert_eq!(lexer.peek(n), expected);
            }
            Op::Codepoint(n) => {
                let rune = lexer.peek_codepoint(usize::from(n));
                assert!((1..=4).contains(&rune.len));
            }
            Op::Advance(n) => {
                for _ in 0..n {
                    lexer.peek(0);
                    if lexer.err().is_some() {
                        break;
                    }
                    lexer.move_by(1);
                    pos += 1;
                }
            }
            Op::Back(n) => {
                lexer.move_by(-isize::from(n));
                pos = pos.saturating_sub(usize::from(n)).max(start);
            }
            Op::Mark => mark = Some(lexer.mark()),
            Op::Rewind => {
                if let Some(mark) = mark {
                    lexer.rewind(mark);
                    pos = start + mark;
                }
            }
            Op::Shift => {
                assert_eq!(lexer.shift(), &data[start..pos]);
                committed += pos - start;
                start = pos;
                mark = None;
            }
            Op::Skip => {
                lexer.skip();
                committed += pos - start;
                start = pos;
                mark = None;
            }
            Op::Release => {
                let n = lexer.shift_len();
                reported += n;
                lexer.free(n);
                assert_eq!(reported, committed);
            }
        }
        assert_eq!(lexer.lexeme(), &data[start..pos]);
        assert_eq!(lexer.offset(), pos);
        assert_eq!(lexer.token_offset(), start);
    }

    lexer.release();
    assert_eq!(lexer.pool().stats().in_flight, 0);
}

fuzz_target!(|input: Input| run(&input));

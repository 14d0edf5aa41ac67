//! Counts words, lines and distinct words on stdin, streaming the input
//! through a small lexer buffer.
//!
//! Run with
//!
//! ```bash
//! cargo run -p lexbuf --example word_count < README.md
//! RUST_LOG=lexbuf=debug cargo run -p lexbuf --example word_count < README.md
//! ```

use std::collections::BTreeMap;
use std::io;

use lexbuf::{Lexer, ReadSource};

fn main() {
    env_logger::init();

    let mut lexer = Lexer::with_capacity(ReadSource::new(io::stdin().lock()), 256);
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut lines = 0usize;

    loop {
        loop {
            match lexer.peek(0) {
                b'\n' => lines += 1,
                b if b.is_ascii_whitespace() => {}
                _ => break,
            }
            lexer.move_by(1);
        }
        lexer.skip();
        if lexer.peek(0) == 0 && lexer.err().is_some() {
            if let Some(err) = lexer.err().filter(|e| !e.is_eof()) {
                eprintln!("read failed at byte {}: {err}", lexer.offset());
            }
            break;
        }

        while !lexer.peek(0).is_ascii_whitespace() && lexer.err().is_none() {
            lexer.move_by(1);
        }
        let word = String::from_utf8_lossy(lexer.shift()).to_lowercase();
        *counts.entry(word).or_default() += 1;
        lexer.release();
    }

    let words: usize = counts.values().sum();
    println!("{lines} lines, {words} words, {} distinct", counts.len());
    let mut top: Vec<_> = counts.into_iter().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (word, n) in top.into_iter().take(10) {
        println!("{n:>8} {word}");
    }
}

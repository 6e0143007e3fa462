//! Benchmarks for inbound line parsing and framing.

use bytes::BytesMut;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mentat_proto::{LineCodec, ParsedMessage};
use tokio_util::codec::Decoder;

/// Keepalive from the server
const PING_LINE: &str = "PING :irc.example.com";

/// Owner command in a channel
const COMMAND_LINE: &str = ":iruan!user@host.example.com PRIVMSG #test :!join ##sub";

/// Ordinary chat with colons in the text
const CHAT_LINE: &str =
    ":someone!~user@host.example.com PRIVMSG #long-channel-name :meeting at 12:30, see you :)";

/// Numeric response
const NUMERIC_LINE: &str = ":irc.server.net 001 mentat :Welcome to the IRC Network mentat!m@h";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    for (name, line) in [
        ("ping", PING_LINE),
        ("command", COMMAND_LINE),
        ("chat", CHAT_LINE),
        ("numeric", NUMERIC_LINE),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(ParsedMessage::parse(black_box(line))))
        });
    }

    group.finish();
}

fn benchmark_framing(c: &mut Criterion) {
    let burst = [PING_LINE, COMMAND_LINE, CHAT_LINE, NUMERIC_LINE].join("\r\n") + "\r\n";

    c.bench_function("frame_burst", |b| {
        b.iter(|| {
            let mut codec = LineCodec::new();
            let mut buf = BytesMut::from(burst.as_str());
            let mut count = 0;
            while let Ok(Some(line)) = codec.decode(&mut buf) {
                black_box(line);
                count += 1;
            }
            count
        })
    });
}

criterion_group!(benches, benchmark_parsing, benchmark_framing);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(path).unwrap()
}

fn bench_decode_multipart(c: &mut Criterion) {
    let message = fixture("nested_alternative.eml");
    let decoder = mimetree::Decoder::default();

    c.bench_function("decode_nested_alternative", |b| {
        b.iter(|| decoder.decode_bytes(&message))
    });
}

fn bench_decode_headers(c: &mut Criterion) {
    let header = "=?UTF-8?B?UmFwcG9ydCBtZW5zdWVs?= =?UTF-8?Q?_=E2=80=94_juin?= \
                  and =?ISO-8859-1?Q?Fran=E7ois?= plain text";

    c.bench_function("decode_encoded_words", |b| {
        b.iter(|| mimetree::parser::encoded_word::decode_encoded_words(header))
    });
}

fn bench_decode_large_base64(c: &mut Criterion) {
    let mut message = String::from(
        "Content-Type: multipart/mixed; boundary=b\n\n--b\n\
         Content-Type: application/octet-stream\n\
         Content-Transfer-Encoding: base64\n\n",
    );
    for _ in 0..2000 {
        message.push_str("QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVphYmNkZWZnaGlqa2xtbm9wcXJzdHV2\n");
    }
    message.push_str("--b--\n");

    c.bench_function("decode_base64_attachment", |b| {
        b.iter(|| mimetree::decode(&message))
    });
}

criterion_group!(
    benches,
    bench_decode_multipart,
    bench_decode_headers,
    bench_decode_large_base64
);
criterion_main!(benches);

//! Filename extraction from `Content-Disposition` headers and URL paths.

/// Filename announced by a `Content-Disposition` header value.
///
/// `filename*=charset''value` takes precedence over `filename=`; quoted and
/// bare `filename=` values are both accepted. The result is percent-decoded.
pub fn filename_from_content_disposition(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for (name, value) in parameters(header_value) {
        if name.eq_ignore_ascii_case("filename*") {
            // RFC 5987: charset'language'percent-encoded
            let encoded = value.splitn(3, '\'').nth(2).unwrap_or(value.as_str());
            let decoded = percent_decode(encoded);
            if !decoded.is_empty() {
                return Some(decoded);
            }
        } else if name.eq_ignore_ascii_case("filename") {
            let decoded = percent_decode(&value);
            if !decoded.is_empty() {
                plain = Some(decoded);
            }
        }
    }

    plain
}

/// `name=value` pairs of a header value. Quoted values may contain `;` and
/// `\"`; segments without `=` (the disposition type) are skipped.
fn parameters(header_value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut rest = header_value;

    while let Some(eq) = rest.find('=') {
        if let Some(semi) = rest[..eq].find(';') {
            rest = &rest[semi + 1..];
            continue;
        }
        let name = rest[..eq].trim().to_string();
        let after = rest[eq + 1..].trim_start();

        let (value, remainder) = match after.strip_prefix('"') {
            Some(quoted) => {
                let (value, consumed) = read_quoted(quoted);
                let tail = &quoted[consumed..];
                (value, tail.find(';').map(|i| &tail[i + 1..]))
            }
            None => match after.find(';') {
                Some(i) => (after[..i].trim().to_string(), Some(&after[i + 1..])),
                None => (after.trim().to_string(), None),
            },
        };
        params.push((name, value));

        match remainder {
            Some(next) => rest = next,
            None => break,
        }
    }

    params
}

/// Reads a quoted-string body that follows the opening quote. Returns the
/// unescaped value and the bytes consumed, closing quote included.
fn read_quoted(input: &str) -> (String, usize) {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return (value, i + 1),
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
            }
            _ => value.push(c),
        }
    }
    (value, input.len())
}

/// Last non-empty path segment of `url`, percent-decoded.
pub fn filename_from_url(url: &url::Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = percent_decode(segment);
    (!decoded.is_empty() && decoded != "." && decoded != "..").then_some(decoded)
}

/// Decodes `%XX` escapes; malformed escapes are kept literally and invalid
/// UTF-8 is replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

use trojan_forward::core::rewriter::{classify, rewrite_lines, MALFORMED_PREFIX};
use trojan_forward::domain::model::LineKind;
use trojan_forward::rewrite;

#[test]
fn test_documented_examples() {
    assert_eq!(
        rewrite("trojan://abc123@example.com:443?security=tls&sni=example.com#MyNode"),
        "forward=trojan://abc123@example.com:443?serverName=example.com&skipVerify=true#MyNode"
    );
    assert_eq!(rewrite("not-a-link"), "not-a-link");
    assert_eq!(rewrite("trojan://badformat"), "格式错误: trojan://badformat");
}

#[test]
fn test_every_line_maps_to_one_output_line() {
    let input: Vec<String> = (0..50)
        .map(|i| match i % 3 {
            0 => format!("trojan://pw{}@node{}.example:{}?sni=s#节点{}", i, i, 1000 + i, i),
            1 => format!("ss://line-{}", i),
            _ => format!("trojan://missing-port-{}@h?x", i),
        })
        .collect();

    let outcome = rewrite_lines(&input.join("\n"));
    assert_eq!(outcome.lines.len(), input.len());

    for (i, (src, out)) in input.iter().zip(outcome.lines.iter()).enumerate() {
        let out = out.as_str();
        match i % 3 {
            0 => {
                assert_eq!(
                    out,
                    format!(
                        "forward=trojan://pw{}@node{}.example:{}?serverName=node{}.example&skipVerify=true#节点{}",
                        i, i, 1000 + i, i, i
                    )
                );
            }
            1 => assert_eq!(out, src.as_str()),
            _ => assert_eq!(out, format!("{}{}", MALFORMED_PREFIX, src)),
        }
    }
}

#[test]
fn test_output_is_stable_under_second_pass() {
    let input = "trojan://a@h:1?x#r\nplain\ntrojan://bad";
    let first = rewrite(input);
    let second = rewrite(&first);
    assert_eq!(first, second);
    for line in first.lines() {
        assert_eq!(classify(line), LineKind::Passthrough);
    }
}

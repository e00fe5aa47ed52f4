use super::*;
use ntest::timeout;

#[test]
#[timeout(4000)]
fn pathological_emphases() {
    let n = 1_000;
    let input = format!("{}b", "*a ".repeat(n));
    let exp = format!("<p>{}</p>\n", input);

    html(&input, &exp);
}

#[test]
#[timeout(4000)]
fn pathological_brackets() {
    let n = 10_000;
    let input = "[".repeat(n);
    let exp = format!("<p>{}</p>\n", input);

    html(&input, &exp);
}

#[test]
#[timeout(4000)]
fn nested_blockquotes() {
    let n = 100;
    let input = format!("{} a", ">".repeat(n));
    let exp = format!(
        "{}<p>a</p>\n{}",
        "<blockquote>\n".repeat(n),
        "</blockquote>\n".repeat(n)
    );

    html(&input, &exp);
}

#[test]
#[timeout(4000)]
fn many_references() {
    let n = 5_000;
    let mut input = String::new();
    for i in 0..n {
        input += &format!("[l{}]: /{}\n", i, i);
    }
    input += "\n[l1] [l4999]";
    let exp = "<p><a href=\"/1\">l1</a> <a href=\"/4999\">l4999</a></p>\n";

    html(&input, exp);
}

use roguewick::parser::ParsingErrorType;
use roguewick::parser::byte_parser::ByteParser;

const DELIMITERS: &[u8] = b"(),:; \t\n\r";

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_comment() {
    let mut parser = ByteParser::for_str("[&R] ((A:1,B:1):1,C:2);");
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b' '));
    assert_eq!(parser.next_byte(), Some(b'('));
    assert!(!parser.skip_comment().unwrap());
}

#[test]
fn test_skip_comment_and_whitespace() {
    let mut parser =
        ByteParser::for_str("[Go] \n[Keep going]   \t ['...']\n[One more to go]  END!");
    parser
        .skip_comment_and_whitespace()
        .expect("Failed to skip comments.");
    assert_eq!(parser.next_byte(), Some(b'E'));
}

#[test]
fn test_unclosed_comment() {
    let mut parser = ByteParser::for_str("  [never closed (A,B);");
    let err = parser.skip_comment_and_whitespace().unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_consume_through() {
    let mut parser = ByteParser::for_str("consume a CAN of beans");
    assert!(parser.consume_through(b'C'));
    assert_eq!(parser.peek(), Some(b'A'));
    assert_eq!(parser.position(), 11);
}

#[test]
fn test_consume_through_missing_target() {
    let mut parser = ByteParser::for_str("leek soup, hmm");
    assert!(!parser.consume_through(b'!'));
    assert!(parser.is_eof());
}

#[test]
fn test_is_eof() {
    let mut parser = ByteParser::for_str("... happily ever after!");
    parser.consume_through(b'!');
    assert!(parser.is_eof());
}

#[test]
fn test_position() {
    let mut parser = ByteParser::for_str("Where are we?");
    assert_eq!(parser.position(), 0);
    parser.peek();
    assert_eq!(parser.position(), 0);
    parser.next_byte();
    assert_eq!(parser.position(), 1);
}

#[test]
fn test_parse_unquoted_label() {
    let mut parser = ByteParser::for_str("Scarabaeus:0.5");
    let label = parser.parse_unquoted_label(DELIMITERS);
    assert_eq!(label, "Scarabaeus");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_parse_quoted_label() {
    let mut parser = ByteParser::for_str("'Scarabaeus viettei':0.5");
    let label = parser.parse_quoted_label().unwrap();
    assert_eq!(label, "Scarabaeus viettei");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_parse_quoted_label_with_escaped_quote() {
    let mut parser = ByteParser::for_str("'Wilson''s_storm-petrel',");
    let label = parser.parse_quoted_label().unwrap();
    assert_eq!(label, "Wilson's_storm-petrel");
    assert_eq!(parser.peek(), Some(b','));
}

#[test]
fn test_parse_quoted_label_unclosed() {
    let mut parser = ByteParser::for_str("'Wilson''s_storm-petrel,B);");
    assert!(matches!(
        parser.parse_quoted_label().unwrap_err().kind(),
        ParsingErrorType::InvalidNewickString(_)
    ));
}

#[test]
fn test_parse_quoted_label_utf8() {
    let mut parser = ByteParser::for_str("'Kākāpō',");
    assert_eq!(parser.parse_quoted_label().unwrap(), "Kākāpō");
}

#[test]
fn test_parse_label_chooses_quoted() {
    let mut parser = ByteParser::for_str(" 'Quoted label' ");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "Quoted label");
}

#[test]
fn test_parse_label_chooses_unquoted() {
    let mut parser = ByteParser::for_str("  UnquotedLabel:");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "UnquotedLabel");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_get_context_as_string() {
    let mut parser = ByteParser::for_str("((A,B),C);");
    assert_eq!(parser.get_context_as_string(5), "((A,B");

    parser.consume_through(b')');
    assert_eq!(parser.get_context_as_string(10), ",C);");
    assert_eq!(parser.position(), 6);
}

#[test]
fn test_slice_source_cursor() {
    use roguewick::parser::{ByteSource, SliceByteSource};

    let mut source = SliceByteSource::new(b"(A,B);");
    assert_eq!(source.next_byte(), Some(b'('));
    assert_eq!(source.position(), 1);
    assert_eq!(source.context(3), b"A,B");
    assert_eq!(source.context(100), b"A,B);");
    assert_eq!(source.remaining(), b"A,B);");

    while source.next_byte().is_some() {}
    assert!(source.is_eof());
    assert_eq!(source.context(5), b"");
    assert_eq!(source.position(), 6);
}

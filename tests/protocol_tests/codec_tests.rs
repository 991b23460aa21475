//! Codec Tests
//!
//! Tests for request reading and response encoding.

use std::io::{BufReader, Cursor, ErrorKind};

use skkserv::protocol::{
    encode_request, encode_response, parse_reply, read_reply, read_request, write_response,
    Command, CommandType, CustomizeCommand, Response, MAX_REQUEST_LEN,
};
use skkserv::SkkError;

// =============================================================================
// Response Encoding Tests
// =============================================================================

#[test]
fn test_encode_found_candidates() {
    let response = Response::Found(vec!["候補1".to_string(), "候補2".to_string()]);
    assert_eq!(encode_response(&response), "1/候補1/候補2/\n".as_bytes());
}

#[test]
fn test_encode_single_candidate() {
    let response = Response::Found(vec!["漢字".to_string()]);
    assert_eq!(encode_response(&response), "1/漢字/\n".as_bytes());
}

#[test]
fn test_encode_not_found_echoes_key() {
    let response = Response::NotFound("nope".to_string());
    assert_eq!(encode_response(&response), b"4nope \n");
}

#[test]
fn test_encode_not_found_empty_key() {
    let response = Response::NotFound(String::new());
    assert_eq!(encode_response(&response), b"4 \n");
}

#[test]
fn test_encode_info_appends_space_and_newline() {
    for text in ["skkserv-0.1.0", "127.0.0.1:1178", "[::1]:1178", ""] {
        let bytes = encode_response(&Response::Info(text.to_string()));
        assert!(bytes.ends_with(b" \n"), "{:?}", text);
        assert_eq!(bytes.len(), text.len() + 2);
    }
}

#[test]
fn test_encode_empty_writes_nothing() {
    assert!(encode_response(&Response::Empty).is_empty());
}

#[test]
fn test_from_candidates_treats_empty_list_as_not_found() {
    assert_eq!(
        Response::from_candidates("key", Some(vec![])),
        Response::NotFound("key".to_string())
    );
    assert_eq!(
        Response::from_candidates("key", None),
        Response::NotFound("key".to_string())
    );
}

// =============================================================================
// Stream Tests
// =============================================================================

#[test]
fn test_read_request_line_by_line() {
    let mut reader = BufReader::new(Cursor::new(b"1hoge \n2 \n".to_vec()));

    assert_eq!(read_request(&mut reader).unwrap(), b"1hoge \n");
    assert_eq!(read_request(&mut reader).unwrap(), b"2 \n");
}

#[test]
fn test_read_request_eof_is_transport_error() {
    let mut reader = BufReader::new(Cursor::new(Vec::new()));

    match read_request(&mut reader) {
        Err(SkkError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("Expected EOF, got {:?}", other),
    }
}

#[test]
fn test_read_request_drops_partial_final_line() {
    let mut reader = BufReader::new(Cursor::new(b"2 \n1partial ".to_vec()));

    assert_eq!(read_request(&mut reader).unwrap(), b"2 \n");
    match read_request(&mut reader) {
        Err(SkkError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("Expected EOF, got {:?}", other),
    }
}

#[test]
fn test_read_request_rejects_overlong_line() {
    let mut data = vec![b'1'; MAX_REQUEST_LEN + 10];
    data.push(b'\n');
    let mut reader = BufReader::new(Cursor::new(data));

    match read_request(&mut reader) {
        Err(SkkError::Io(e)) => assert_eq!(e.kind(), ErrorKind::InvalidData),
        other => panic!("Expected InvalidData, got {:?}", other),
    }
}

#[test]
fn test_write_response_empty_writes_nothing() {
    let mut out = Vec::new();
    write_response(&mut out, &Response::Empty).unwrap();
    assert!(out.is_empty());

    write_response(&mut out, &Response::NotFound("x".to_string())).unwrap();
    assert_eq!(out, b"4x \n");
}

#[test]
fn test_only_empty_response_is_empty() {
    assert!(Response::Empty.is_empty());
    assert!(!Response::Info(String::new()).is_empty());
    assert!(!Response::NotFound(String::new()).is_empty());
    assert!(!Response::Found(vec!["a".to_string()]).is_empty());

    // An empty Info still puts a line on the wire
    let mut out = Vec::new();
    write_response(&mut out, &Response::Info(String::new())).unwrap();
    assert_eq!(out, b" \n");
}

// =============================================================================
// Client Side Tests
// =============================================================================

#[test]
fn test_encode_requests() {
    assert_eq!(encode_request(&Command::Disconnect), "0 \n");
    assert_eq!(
        encode_request(&Command::Lookup { key: "かな".to_string() }),
        "1かな \n"
    );
    assert_eq!(encode_request(&Command::Version), "2 \n");
    assert_eq!(encode_request(&Command::Host), "3 \n");
    assert_eq!(
        encode_request(&Command::Completion { prefix: "か".to_string() }),
        "4か \n"
    );
    assert_eq!(
        encode_request(&Command::Customize(CustomizeCommand::Reload)),
        "creload \n"
    );
}

#[test]
fn test_parse_found_reply() {
    let reply = parse_reply("1/候補1/候補2/\n", CommandType::Lookup).unwrap();
    assert_eq!(
        reply,
        Response::Found(vec!["候補1".to_string(), "候補2".to_string()])
    );
}

#[test]
fn test_parse_not_found_reply() {
    let reply = parse_reply("4nope \n", CommandType::Completion).unwrap();
    assert_eq!(reply, Response::NotFound("nope".to_string()));
}

#[test]
fn test_parse_host_reply_starting_with_four() {
    // A host address starting with '4' is still just text
    let reply = parse_reply("4.3.2.1:1178 \n", CommandType::Host).unwrap();
    assert_eq!(reply, Response::Info("4.3.2.1:1178".to_string()));
}

#[test]
fn test_parse_malformed_candidate_list() {
    assert!(parse_reply("1/unterminated\n", CommandType::Lookup).is_err());
    assert!(parse_reply("9garbage\n", CommandType::Lookup).is_err());
}

#[test]
fn test_read_reply_lossy_utf8() {
    let mut reader = BufReader::new(Cursor::new("1/漢字/\n".as_bytes().to_vec()));
    assert_eq!(read_reply(&mut reader).unwrap(), "1/漢字/\n");
}

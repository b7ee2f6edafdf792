//! Integration test: full request path (tokens → config → session → driver)
//!
//! Runs against an in-memory stand-in for the streamf driver that keeps two
//! bounded stacks of raw descriptors, so no kernel module is required.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use streamf_device::{ControlConfig, DeviceControl, DeviceError, DeviceSession, Outcome};
use streamf_shared::protocol::request::{
    STREAMF_IOCGPOPR, STREAMF_IOCGPOPW, STREAMF_IOCRESETR, STREAMF_IOCRESETW, STREAMF_IOCSPUSHR,
    STREAMF_IOCSPUSHW,
};
use streamf_shared::{Direction, Filter, Operation, RawFilter, RequestCode, Word, MAX_WORD_SIZE};

const CAPACITY: usize = 2;

#[derive(Default)]
struct Stacks {
    read: Vec<RawFilter>,
    write: Vec<RawFilter>,
}

/// One open handle on the fake driver. Dropping it marks the device closed.
struct FakeHandle {
    stacks: Rc<RefCell<Stacks>>,
    calls: Rc<Cell<usize>>,
    closed: Rc<Cell<bool>>,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.closed.set(true);
    }
}

impl DeviceControl for FakeHandle {
    fn control(&mut self, code: RequestCode, descriptor: &mut RawFilter) -> io::Result<()> {
        self.calls.set(self.calls.get() + 1);
        let mut stacks = self.stacks.borrow_mut();
        let raw = code.raw();

        let push = |stack: &mut Vec<RawFilter>, descriptor: &RawFilter| -> io::Result<()> {
            if stack.len() == CAPACITY {
                return Err(io::Error::from_raw_os_error(libc::ENOSPC));
            }
            stack.push(*descriptor);
            Ok(())
        };
        let pop = |stack: &mut Vec<RawFilter>, descriptor: &mut RawFilter| -> io::Result<()> {
            *descriptor = stack
                .pop()
                .ok_or_else(|| io::Error::from_raw_os_error(libc::ENODATA))?;
            Ok(())
        };

        if raw == STREAMF_IOCSPUSHR {
            push(&mut stacks.read, &*descriptor)
        } else if raw == STREAMF_IOCSPUSHW {
            push(&mut stacks.write, &*descriptor)
        } else if raw == STREAMF_IOCGPOPR {
            pop(&mut stacks.read, descriptor)
        } else if raw == STREAMF_IOCGPOPW {
            pop(&mut stacks.write, descriptor)
        } else if raw == STREAMF_IOCRESETR {
            stacks.read.clear();
            Ok(())
        } else if raw == STREAMF_IOCRESETW {
            stacks.write.clear();
            Ok(())
        } else {
            Err(io::Error::from_raw_os_error(libc::ENOTTY))
        }
    }
}

#[derive(Default)]
struct FakeDriver {
    stacks: Rc<RefCell<Stacks>>,
    calls: Rc<Cell<usize>>,
}

impl FakeDriver {
    fn open(&self) -> (DeviceSession<FakeHandle>, Rc<Cell<bool>>) {
        let closed = Rc::new(Cell::new(false));
        let handle = FakeHandle {
            stacks: Rc::clone(&self.stacks),
            calls: Rc::clone(&self.calls),
            closed: Rc::clone(&closed),
        };
        (DeviceSession::with_device("/dev/streamf", handle), closed)
    }

    fn run(&self, direction: &str, operation: &str, filter: &[&str]) -> Result<Outcome, DeviceError> {
        let raw: Vec<&[u8]> = filter.iter().map(|token| token.as_bytes()).collect();
        self.run_raw(direction, operation, &raw)
    }

    fn run_raw(
        &self,
        direction: &str,
        operation: &str,
        filter: &[&[u8]],
    ) -> Result<Outcome, DeviceError> {
        let config = ControlConfig::from_tokens("/dev/streamf", direction, operation, filter)
            .expect("tokens should parse");
        let (session, closed) = self.open();
        let result = session.submit(&config.request);
        assert!(closed.get(), "device must be closed after every request");
        result
    }
}

#[test]
fn test_push_subs_lands_on_write_stack() {
    let driver = FakeDriver::default();
    let outcome = driver.run("w", "push", &["subs", "hello", "bye"]).unwrap();
    assert_eq!(outcome, Outcome::Pushed);

    let stacks = driver.stacks.borrow();
    assert!(stacks.read.is_empty());
    assert_eq!(stacks.write.len(), 1);
    assert_eq!(
        stacks.write[0].decode().unwrap(),
        Filter::Substitute {
            from: Word::new("hello"),
            to: Word::new("bye"),
        }
    );
    assert_eq!(driver.calls.get(), 1);
}

#[test]
fn test_stacks_are_lifo_and_independent() {
    let driver = FakeDriver::default();
    driver.run("r", "push", &["upper"]).unwrap();
    driver.run("r", "push", &["censor", "darn"]).unwrap();
    driver.run("w", "push", &["lower"]).unwrap();

    assert_eq!(
        driver.run("r", "pop", &[]).unwrap(),
        Outcome::Popped(Filter::Censor {
            word: Word::new("darn")
        })
    );
    assert_eq!(
        driver.run("w", "pop", &[]).unwrap(),
        Outcome::Popped(Filter::Lowercase)
    );
    assert_eq!(
        driver.run("r", "pop", &[]).unwrap(),
        Outcome::Popped(Filter::Uppercase)
    );
}

#[test]
fn test_pop_empty_stack_is_rejected_after_close() {
    let driver = FakeDriver::default();
    let err = driver.run("r", "pop", &[]).unwrap_err();

    match err {
        DeviceError::RequestRejected {
            operation,
            code,
            source,
        } => {
            assert_eq!(operation, Operation::Pop);
            assert_eq!(code, RequestCode::resolve(Direction::Read, Operation::Pop));
            assert_eq!(source.raw_os_error(), Some(libc::ENODATA));
        }
        other => panic!("expected RequestRejected, got {:?}", other),
    }
}

#[test]
fn test_push_full_stack_is_rejected() {
    let driver = FakeDriver::default();
    for _ in 0..CAPACITY {
        driver.run("w", "push", &["upper"]).unwrap();
    }
    let err = driver.run("w", "push", &["lower"]).unwrap_err();
    assert!(matches!(err, DeviceError::RequestRejected { .. }));
    assert!(err.to_string().contains("full or empty"));
}

#[test]
fn test_reset_clears_only_addressed_stack() {
    let driver = FakeDriver::default();
    driver.run("r", "push", &["upper"]).unwrap();
    driver.run("w", "push", &["lower"]).unwrap();

    assert_eq!(driver.run("w", "reset", &[]).unwrap(), Outcome::Reset);

    let stacks = driver.stacks.borrow();
    assert_eq!(stacks.read.len(), 1);
    assert!(stacks.write.is_empty());
}

#[test]
fn test_saturated_words_survive_the_driver() {
    let driver = FakeDriver::default();
    let from = "abcdefghijklmnopqrstuvwxyz";
    let cipher = "k".repeat(MAX_WORD_SIZE);
    driver
        .run("w", "push", &["xor", from, cipher.as_str()])
        .unwrap();

    match driver.run("w", "pop", &[]).unwrap() {
        Outcome::Popped(Filter::XorCipher { from: f, cipher: c }) => {
            assert_eq!(f.as_bytes(), &from.as_bytes()[..MAX_WORD_SIZE]);
            assert!(c.is_saturated());
            assert_eq!(
                Filter::XorCipher { from: f, cipher: c }.to_string(),
                format!("XOR from:[{}] cypher:[{}]", &from[..MAX_WORD_SIZE], cipher)
            );
        }
        other => panic!("expected popped XorCipher, got {:?}", other),
    }
}

#[test]
fn test_popped_word_cut_mid_character_prints_retained_bytes() {
    let driver = FakeDriver::default();
    let word = format!("a{}", "\u{e9}".repeat(10));
    driver.run("r", "push", &["censor", word.as_str()]).unwrap();

    let filter = match driver.run("r", "pop", &[]).unwrap() {
        Outcome::Popped(filter) => filter,
        other => panic!("expected popped filter, got {:?}", other),
    };
    let mut printed = Vec::new();
    filter.write_to(&mut printed).unwrap();

    let mut expected = b"CENSOR [".to_vec();
    expected.extend_from_slice(&word.as_bytes()[..MAX_WORD_SIZE]);
    expected.push(b']');
    assert_eq!(printed, expected);
    assert!(printed.ends_with(&[0xc3, 0xa9, 0xc3, b']']));
}

#[test]
fn test_non_utf8_words_round_trip() {
    let driver = FakeDriver::default();
    let tokens: [&[u8]; 3] = [b"subs", b"caf\xe9", b"tea"];
    driver.run_raw("w", "push", &tokens).unwrap();

    match driver.run("w", "pop", &[]).unwrap() {
        Outcome::Popped(Filter::Substitute { from, to }) => {
            assert_eq!(from.as_bytes(), b"caf\xe9");
            assert_eq!(to.as_bytes(), b"tea");
        }
        other => panic!("expected popped Substitute, got {:?}", other),
    }
}

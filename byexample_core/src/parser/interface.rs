use crate::constant::ERROR_PREFIX;
use crate::parser::ErrorContext;

/// Where a [`CommandLine`](crate::CommandLine) sends the usage message and its diagnostics.
pub trait UserInterface {
    /// Display a message (ex: the usage message on `--help`).
    fn print(&self, message: String);

    /// Display an error.
    fn print_error(&self, error: &dyn std::error::Error);

    /// Display the argument list, pointing at the token at fault.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// Messages to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &dyn std::error::Error) {
        eprintln!("{ERROR_PREFIX}{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// User interfaces that record their output, for testing.
#[cfg(any(test, feature = "unit_test"))]
pub mod util {
    use crate::parser::{ErrorContext, UserInterface};
    use std::cell::RefCell;
    use std::sync::mpsc;

    /// Records the output in memory; read it back with [`InMemoryInterface::consume`].
    #[derive(Debug, Default)]
    pub struct InMemoryInterface {
        message: RefCell<Option<Vec<String>>>,
        error: RefCell<Option<String>>,
        error_context: RefCell<Option<ErrorContext>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.message
                .borrow_mut()
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: &dyn std::error::Error) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once.
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        /// The printed message (lines joined by `\n`), the error message and the error context.
        pub fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let InMemoryInterface {
                message,
                error,
                error_context,
            } = self;

            (
                message.take().map(|messages| messages.join("\n")),
                error.take(),
                error_context.take(),
            )
        }

        /// The printed message, asserting that nothing else was printed.
        pub fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.expect("a message must have been printed")
        }
    }

    /// A user interface that can be moved into a [`CommandLine`](crate::CommandLine), with a receiver to read back its output.
    ///
    /// The output becomes available to the receiver once the sender is dropped.
    pub fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let (error_context_tx, error_context_rx) = mpsc::channel();
        let sender = SenderInterface {
            message_tx,
            error_tx,
            error_context_tx,
        };
        let receiver = ReceiverInterface {
            message_rx,
            error_rx,
            error_context_rx,
        };
        (sender, receiver)
    }

    /// The sending half of [`channel_interface`].
    #[derive(Debug)]
    pub struct SenderInterface {
        message_tx: mpsc::Sender<Option<String>>,
        error_tx: mpsc::Sender<Option<String>>,
        error_context_tx: mpsc::Sender<Option<ErrorContext>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            // The receiver may already be gone.
            let _ = self.message_tx.send(None);
            let _ = self.error_tx.send(None);
            let _ = self.error_context_tx.send(None);
        }
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, with the receiver concatenating the messages.
            let _ = self.message_tx.send(Some(message));
        }

        fn print_error(&self, error: &dyn std::error::Error) {
            let _ = self.error_tx.send(Some(error.to_string()));
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once, with the receiver only taking the first.
            let _ = self.error_context_tx.send(Some(error_context));
        }
    }

    /// The receiving half of [`channel_interface`].
    #[derive(Debug)]
    pub struct ReceiverInterface {
        message_rx: mpsc::Receiver<Option<String>>,
        error_rx: mpsc::Receiver<Option<String>>,
        error_context_rx: mpsc::Receiver<Option<ErrorContext>>,
    }

    impl ReceiverInterface {
        /// The printed message (lines joined by `\n`), the error message and the error context.
        ///
        /// Blocks until the sender is dropped.
        pub fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let ReceiverInterface {
                message_rx,
                error_rx,
                error_context_rx,
            } = self;

            (
                drain(message_rx),
                drain(error_rx),
                // Assumes print_error_context() is only ever called once
                // (we take the first if multiple were sent on the channel).
                error_context_rx.recv().ok().flatten(),
            )
        }
    }

    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Option<String> {
        let mut values = Vec::default();

        while let Ok(Some(message)) = receiver.recv() {
            values.push(message);
        }

        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}

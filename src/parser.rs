//! Streaming XML dump reader.
//!
//! A [`DumpSource`] opens a dump file, detecting bzip2 compression from the
//! file name and confirming it with the stream's magic bytes. [`TagStream`]
//! turns the byte stream into [`TagEvent`]s one at a time, and
//! [`DumpParser`] replays those events as [`DumpHandler`] callbacks with an
//! [`ElementContext`] tracking the tag stack and the current element text.

use crate::config::{BZ2_FILE_EXTENSION, BZ2_MAGIC, READ_BUFFER_SIZE};
use crate::error::{Error, Result};
use bzip2::read::MultiBzDecoder;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
}

impl Compression {
    /// Compression implied by the file name.
    pub fn from_path(path: &Path) -> Self {
        let is_bz2 = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(BZ2_FILE_EXTENSION))
            .unwrap_or(false);
        if is_bz2 {
            Compression::Bzip2
        } else {
            Compression::None
        }
    }
}

/// An opened, possibly decompressing, dump byte stream.
pub struct DumpSource {
    path: PathBuf,
    compression: Compression,
    reader: Box<dyn Read>,
}

impl DumpSource {
    /// Opens `path`; names ending in `.bz2` must start with the bzip2 magic bytes.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let compression = Compression::from_path(&path);

        let file = File::open(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let mut file = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let reader: Box<dyn Read> = match compression {
            Compression::None => Box::new(file),
            Compression::Bzip2 => {
                let mut header = Vec::with_capacity(BZ2_MAGIC.len());
                (&mut file)
                    .take(BZ2_MAGIC.len() as u64)
                    .read_to_end(&mut header)
                    .map_err(|source| Error::Io {
                        path: path.clone(),
                        source,
                    })?;
                if header != BZ2_MAGIC {
                    return Err(Error::MalformedHeader {
                        path,
                        found: header,
                    });
                }
                // Hand the consumed magic bytes back to the decoder.
                Box::new(MultiBzDecoder::new(Cursor::new(header).chain(file)))
            }
        };

        info!(path = %path.display(), ?compression, "Opened dump");

        Ok(Self {
            path,
            compression,
            reader,
        })
    }

    /// Wraps an uncompressed stream; `name` is only used in error reports.
    pub fn from_reader(name: impl Into<PathBuf>, reader: impl Read + 'static) -> Self {
        Self {
            path: name.into(),
            compression: Compression::None,
            reader: Box::new(reader),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

/// One tag-level event in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start(String),
    Text(String),
    End(String),
}

/// Lazy sequence of [`TagEvent`]s over a [`DumpSource`].
///
/// The stream ends after the first error. It cannot be rewound; open a new
/// source to parse again.
pub struct TagStream {
    path: PathBuf,
    reader: Reader<BufReader<Box<dyn Read>>>,
    buf: Vec<u8>,
    depth: usize,
    pending: Option<TagEvent>,
    done: bool,
}

impl TagStream {
    pub fn new(source: DumpSource) -> Self {
        let mut reader = Reader::from_reader(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            source.reader,
        ));
        reader.trim_text(false);
        reader.check_end_names(true);

        Self {
            path: source.path,
            reader,
            buf: Vec::with_capacity(8192),
            depth: 0,
            pending: None,
            done: false,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DumpSource::open(path)?))
    }

    fn next_event(&mut self) -> Result<Option<TagEvent>> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(err) => return Err(stream_error(&self.path, position, err)),
            };

            match event {
                Event::Start(e) => {
                    self.depth += 1;
                    return Ok(Some(TagEvent::Start(tag_name(e.name()))));
                }
                Event::Empty(e) => {
                    let name = tag_name(e.name());
                    self.pending = Some(TagEvent::End(name.clone()));
                    return Ok(Some(TagEvent::Start(name)));
                }
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Some(TagEvent::End(tag_name(e.name()))));
                }
                Event::Text(e) if self.depth > 0 => {
                    let text = e
                        .unescape()
                        .map_err(|err| stream_error(&self.path, position, err))?;
                    return Ok(Some(TagEvent::Text(text.into_owned())));
                }
                Event::CData(e) if self.depth > 0 => {
                    return Ok(Some(TagEvent::Text(
                        String::from_utf8_lossy(&e).into_owned(),
                    )));
                }
                Event::Eof => {
                    if self.depth > 0 {
                        let err = quick_xml::Error::UnexpectedEof(format!(
                            "{} unclosed element(s)",
                            self.depth
                        ));
                        return Err(stream_error(
                            &self.path,
                            self.reader.buffer_position(),
                            err,
                        ));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl Iterator for TagStream {
    type Item = Result<TagEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn tag_name(name: QName) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

fn stream_error(path: &Path, position: usize, err: quick_xml::Error) -> Error {
    match err {
        quick_xml::Error::Io(source) => Error::Io {
            path: path.to_path_buf(),
            source: io::Error::new(source.kind(), source),
        },
        source => Error::XmlSyntax { position, source },
    }
}

/// Tag stack and character data seen by a [`DumpHandler`].
#[derive(Debug, Default)]
pub struct ElementContext {
    tags: Vec<String>,
    content: String,
}

impl ElementContext {
    /// Character data since the most recent start tag, or since the last child closed.
    pub fn contents(&self) -> &str {
        &self.content
    }

    /// The element enclosing the one whose callback is running.
    pub fn parent(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.tags.len()
    }
}

/// Callbacks driven by [`DumpParser`] in document order.
pub trait DumpHandler {
    fn on_parser_start(&mut self) {}

    fn on_element_start(&mut self, tag: &str, context: &ElementContext);

    fn on_element_end(&mut self, tag: &str, context: &ElementContext);

    fn on_parser_end(&mut self) {}
}

impl<H: DumpHandler + ?Sized> DumpHandler for &mut H {
    fn on_parser_start(&mut self) {
        (**self).on_parser_start();
    }

    fn on_element_start(&mut self, tag: &str, context: &ElementContext) {
        (**self).on_element_start(tag, context);
    }

    fn on_element_end(&mut self, tag: &str, context: &ElementContext) {
        (**self).on_element_end(tag, context);
    }

    fn on_parser_end(&mut self) {
        (**self).on_parser_end();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Finished,
}

/// Feeds a [`TagStream`] into one [`DumpHandler`].
pub struct DumpParser<H> {
    stream: TagStream,
    context: ElementContext,
    handler: H,
    state: State,
}

impl<H: DumpHandler> DumpParser<H> {
    pub fn new(source: DumpSource, handler: H) -> Self {
        Self {
            stream: TagStream::new(source),
            context: ElementContext::default(),
            handler,
            state: State::Fresh,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Dispatches the next event. Returns `Ok(false)` once the stream is exhausted.
    ///
    /// After an error the parser is finished and `on_parser_end` is never called.
    pub fn advance(&mut self) -> Result<bool> {
        if self.state == State::Finished {
            return Ok(false);
        }
        if self.state == State::Fresh {
            self.state = State::Running;
            self.handler.on_parser_start();
        }

        match self.stream.next() {
            Some(Ok(event)) => {
                self.dispatch(event);
                Ok(true)
            }
            Some(Err(err)) => {
                self.state = State::Finished;
                Err(err)
            }
            None => {
                self.state = State::Finished;
                self.handler.on_parser_end();
                debug!(path = %self.stream.path.display(), "Dump parsed");
                Ok(false)
            }
        }
    }

    /// Drives the whole stream and hands the handler back.
    pub fn run(mut self) -> Result<H> {
        while self.advance()? {}
        Ok(self.handler)
    }

    fn dispatch(&mut self, event: TagEvent) {
        match event {
            TagEvent::Start(tag) => {
                self.context.content.clear();
                self.handler.on_element_start(&tag, &self.context);
                self.context.tags.push(tag);
            }
            TagEvent::Text(text) => self.context.content.push_str(&text),
            TagEvent::End(tag) => {
                self.context.tags.pop();
                self.handler.on_element_end(&tag, &self.context);
                // The parent only sees text that follows its last child.
                self.context.content.clear();
            }
        }
    }
}

/// Parses the dump at `path` with `handler`.
pub fn parse_dump<H: DumpHandler>(path: impl AsRef<Path>, handler: H) -> Result<H> {
    DumpParser::new(DumpSource::open(path)?, handler).run()
}

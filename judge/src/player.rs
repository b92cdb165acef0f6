use std::io::{BufRead, Write};

use ninja_camp::{Board, Move, MoveKey, Request, Response};
use tracing::trace;

/// Where the moves of human players come from.
///
/// Calls block until the human answered.
pub trait MoveSource {
    /// Asks `player` to pick one of `legal_moves`, which is never empty.
    fn choose_move(
        &mut self,
        board: &Board,
        player: usize,
        legal_moves: &[Move],
    ) -> anyhow::Result<Response>;

    /// The last proposal was not one of the legal moves.
    fn invalid_move(&mut self, proposed: MoveKey) -> anyhow::Result<()>;

    fn match_ended(&mut self, _scores: &[i32]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Talks to a human (or a frontend) with one JSON [`Request`] per line,
/// answered by one JSON [`Response`] per line.
///
/// End of input counts as abandoning the match.
pub struct JsonLinesPlayer<R, W> {
    reader: R,
    writer: W,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl<R: BufRead, W: Write> JsonLinesPlayer<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: String::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn send(&mut self, req: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", request = %req_json);
        req_json.push('\n');
        self.writer.write_all(req_json.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn perform_request(&mut self, req: &Request) -> anyhow::Result<Response> {
        self.send(req)?;
        loop {
            self.buf.clear();
            let num_bytes_read = self.reader.read_line(&mut self.buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF
                return Ok(Response::Abandon);
            }
            let serialized_response = self.buf.trim();
            if serialized_response.is_empty() {
                continue;
            }
            trace!(name: "Received response", response = %serialized_response);
            let response = serde_json::from_str::<Response>(serialized_response)?;
            self.buf.clear();
            return Ok(response);
        }
    }
}

impl<R: BufRead, W: Write> MoveSource for JsonLinesPlayer<R, W> {
    fn choose_move(
        &mut self,
        board: &Board,
        player: usize,
        legal_moves: &[Move],
    ) -> anyhow::Result<Response> {
        let keys = legal_moves.iter().map(Move::key).collect();
        self.perform_request(&Request::choose_move(board, player, keys))
    }

    fn invalid_move(&mut self, proposed: MoveKey) -> anyhow::Result<()> {
        self.send(&Request::InvalidMove { proposed })
    }

    fn match_ended(&mut self, scores: &[i32]) -> anyhow::Result<()> {
        self.send(&Request::MatchEnded {
            scores: scores.to_vec(),
        })
    }
}

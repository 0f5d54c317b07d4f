//! Line-based network relay between two remote players and the engine.
//!
//! The server owns the game and serializes every move through one
//! thread, so the engine never sees concurrent mutation. Messages are
//! newline-framed text; two control lines steer the clients:
//!
//! - [`MSG_GET`] - the addressed client must answer with one move line
//! - [`MSG_END`] - the session is over, disconnect
//!
//! Every other line is display text the client prints verbatim. A move
//! line carries two integers, extracted leniently by [`parse_move`] so
//! that `3 4`, `3,4` and `(3, 4)` all work.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use anyhow::{Context, Result, bail};

use crate::board::{Color, Point};
use crate::console;
use crate::game::{Game, PlayOutcome};

/// Asks the addressed client for a move.
pub const MSG_GET: &str = "GET";
/// Tells a client the session is over.
pub const MSG_END: &str = "END";

/// One connected player: buffered reads, line-framed writes.
struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Client {
    fn accept(listener: &TcpListener) -> Result<Self> {
        let (stream, _) = listener.accept().context("failed to accept a client")?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    fn send(&mut self, msg: &str) -> Result<()> {
        writeln!(self.writer, "{msg}")?;
        Ok(())
    }

    fn recv_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("client disconnected");
        }
        Ok(line.trim_end().to_string())
    }
}

/// Relay server: hosts one game between two clients.
pub struct Server {
    listener: TcpListener,
    game: Game,
}

impl Server {
    /// Bind the listening socket; the game starts once both players
    /// have joined in [`Server::run`].
    pub fn bind(port: u16, game: Game) -> Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .with_context(|| format!("failed to bind port {port}"))?;
        Ok(Self { listener, game })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept two clients (Dark joins first) and relay the whole game
    /// between them.
    pub fn run(mut self) -> Result<()> {
        let mut dark = Client::accept(&self.listener)?;
        dark.send("Connected. Waiting for your opponent to join.")?;
        let mut light = Client::accept(&self.listener)?;
        light.send("Connected. Your opponent is already here.")?;
        dark.send("The game begins. You play Dark. Good luck!")?;
        light.send("The game begins. You play Light. Good luck!")?;

        loop {
            let status = console::status(&self.game);
            dark.send(&status)?;
            light.send(&status)?;
            let mover = match self.game.to_move() {
                Color::Dark => &mut dark,
                Color::Light => &mut light,
            };
            if let PlayOutcome::GameOver(_) = Self::request_move(&mut self.game, mover)? {
                break;
            }
        }

        let ending = format!("{}Thanks for playing!", console::status(&self.game));
        dark.send(&ending)?;
        light.send(&ending)?;
        dark.send(MSG_END)?;
        light.send(MSG_END)?;
        Ok(())
    }

    /// Poll one client until it produces an accepted move; engine
    /// rejections are relayed back as text and the client asked again.
    fn request_move(game: &mut Game, client: &mut Client) -> Result<PlayOutcome> {
        loop {
            client.send(MSG_GET)?;
            let line = client.recv_line()?;
            let played = parse_move(&line).and_then(|pos| Ok(game.play(pos)?));
            match played {
                Ok(outcome) => return Ok(outcome),
                Err(err) => client.send(&err.to_string())?,
            }
        }
    }
}

/// Join a hosted game and drive the local player's console.
pub fn connect(addr: &str) -> Result<()> {
    let stream =
        TcpStream::connect(addr).with_context(|| format!("failed to connect to {addr}"))?;
    let mut writer = stream.try_clone()?;
    let reader = BufReader::new(stream);

    for line in reader.lines() {
        match line?.as_str() {
            MSG_GET => {
                let mv = read_move_from_stdin()?;
                writeln!(writer, "{mv}")?;
            }
            MSG_END => break,
            text => println!("{text}"),
        }
    }
    Ok(())
}

fn read_move_from_stdin() -> Result<String> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            bail!("standard input closed");
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
}

/// Extract an `(x, y)` move from free-form input: the first two digit
/// runs win, everything between them is a separator.
pub fn parse_move(input: &str) -> Result<Point> {
    let mut runs = input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty());
    let (Some(x_run), Some(y_run)) = (runs.next(), runs.next()) else {
        bail!("could not read a move from {input:?}, expected two numbers");
    };
    let x = x_run
        .parse()
        .with_context(|| format!("x coordinate {x_run:?} is out of range"))?;
    let y = y_run
        .parse()
        .with_context(|| format!("y coordinate {y_run:?} is out of range"))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_plain() {
        assert_eq!(parse_move("3 4").unwrap(), (3, 4));
        assert_eq!(parse_move("12,7").unwrap(), (12, 7));
    }

    #[test]
    fn test_parse_move_decorated() {
        assert_eq!(parse_move("(3, 4)").unwrap(), (3, 4));
        assert_eq!(parse_move("x=10 y=0").unwrap(), (10, 0));
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        assert!(parse_move("").is_err());
        assert!(parse_move("left").is_err());
        assert!(parse_move("7").is_err());
    }

    #[test]
    fn test_parse_move_rejects_huge_numbers() {
        assert!(parse_move("99999999999999999999 0").is_err());
    }
}

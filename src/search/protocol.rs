// Protocolo de controlo da busca: pedidos, respostas e filtro de respostas antigas

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{info, warn};

use crate::core::*;

use super::alpha_beta::Engine;

/// Pedido do anfitrião ao motor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Start {
        board: Board,
        turn: Color,
        en_passant: Option<Position>,
        max_depth: u8,
        request_id: u64,
    },
    Stop {
        request_id: u64,
    },
}

impl Request {
    pub fn request_id(&self) -> u64 {
        match self {
            Request::Start { request_id, .. } | Request::Stop { request_id } => *request_id,
        }
    }
}

/// Resposta do motor. Cada `Start` termina com exatamente um `Done`, `Stopped` ou `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Update { mv: Move, depth: u8, request_id: u64 },
    Done { mv: Move, request_id: u64 },
    Stopped { request_id: u64 },
    Error { request_id: u64, error: SearchError },
}

impl Response {
    pub fn request_id(&self) -> u64 {
        match self {
            Response::Update { request_id, .. }
            | Response::Done { request_id, .. }
            | Response::Stopped { request_id }
            | Response::Error { request_id, .. } => *request_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Response::Update { .. })
    }
}

/// Forma síncrona: corre o pedido na thread atual e emite as respostas.
/// `Start` rearma a flag de paragem do `engine` antes de buscar; outra thread
/// pode pará-la durante a busca (ver `Engine::stop_flag`).
pub fn request_best_move<F>(engine: &mut Engine, request: Request, emit: F)
where
    F: FnMut(Response),
{
    match request {
        Request::Stop { request_id } => {
            info!(request_id, "stop requested");
            engine.stop();
        }
        Request::Start { board, turn, en_passant, max_depth, request_id } => {
            engine.reset_stop();
            run_search(engine, &board, turn, en_passant, max_depth, request_id, emit);
        }
    }
}

/// Busca sem mexer na flag; o chamador decide quando a rearma.
pub(super) fn run_search<F>(
    engine: &mut Engine,
    board: &Board,
    turn: Color,
    en_passant: Option<Position>,
    max_depth: u8,
    request_id: u64,
    mut emit: F,
) where
    F: FnMut(Response),
{
    info!(request_id, max_depth, "search started");
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        engine.search(board, turn, en_passant, max_depth, |mv, depth| {
            emit(Response::Update { mv: mv.clone(), depth, request_id });
        })
    }));

    let response = match result {
        Ok(outcome) if outcome.stopped => Response::Stopped { request_id },
        Ok(outcome) => match outcome.best_move {
            Some(mv) => {
                info!(
                    request_id,
                    best = %mv,
                    depth = outcome.depth,
                    nodes = outcome.stats.nodes,
                    nps = outcome.stats.nps(),
                    "search done"
                );
                Response::Done { mv, request_id }
            }
            None => Response::Error { request_id, error: SearchError::NoLegalMove },
        },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(request_id, %message, "search panicked");
            // A TT pode ter ficado a meio de uma escrita
            engine.clear();
            Response::Error { request_id, error: SearchError::Panicked(message) }
        }
    };
    emit(response);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Lado do anfitrião: só aceita respostas do pedido vivo.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_id: u64,
    live: Option<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Novo identificador; passa a ser o pedido vivo.
    pub fn begin(&mut self) -> u64 {
        self.next_id += 1;
        self.live = Some(self.next_id);
        self.next_id
    }

    pub fn live(&self) -> Option<u64> {
        self.live
    }

    /// Abandona o pedido vivo; devolve o id para enviar `Stop`.
    pub fn cancel(&mut self) -> Option<u64> {
        self.live.take()
    }

    /// Verdadeiro se a resposta pertence ao pedido vivo. Uma resposta final encerra-o.
    pub fn accept(&mut self, response: &Response) -> bool {
        if self.live != Some(response.request_id()) {
            return false;
        }
        if response.is_terminal() {
            self.live = None;
        }
        true
    }
}

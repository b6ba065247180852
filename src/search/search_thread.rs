// Serviço de busca: uma thread dedicada com caixa de entrada crossbeam

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info};

use crate::core::*;

use super::alpha_beta::{Engine, SearchConfig};
use super::protocol::{request_best_move, run_search, Request, RequestTracker, Response};

/// Handle da thread de busca. A flag de paragem é escrita diretamente pelo handle;
/// os pedidos passam pela fila, por isso cada busca termina antes da seguinte começar.
pub struct SearchService {
    inbox: Option<Sender<Request>>,
    responses: Receiver<Response>,
    stop: Arc<AtomicBool>,
    latest: Arc<AtomicU64>,
    tracker: RequestTracker,
    worker: Option<JoinHandle<()>>,
}

impl SearchService {
    pub fn spawn(config: SearchConfig) -> io::Result<Self> {
        let (inbox, requests) = channel::unbounded::<Request>();
        let (outbox, responses) = channel::unbounded::<Response>();
        let stop = Arc::new(AtomicBool::new(false));
        let latest = Arc::new(AtomicU64::new(0));

        let worker = {
            let stop = Arc::clone(&stop);
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name("power-search".to_string())
                .spawn(move || worker_loop(config, requests, outbox, stop, latest))?
        };

        Ok(SearchService {
            inbox: Some(inbox),
            responses,
            stop,
            latest,
            tracker: RequestTracker::new(),
            worker: Some(worker),
        })
    }

    /// Inicia uma busca; uma busca viva é cancelada primeiro.
    pub fn start(
        &mut self,
        board: Board,
        turn: Color,
        en_passant: Option<Position>,
        max_depth: u8,
    ) -> Result<u64, SearchError> {
        self.stop();
        let request_id = self.tracker.begin();
        self.latest.store(request_id, Ordering::SeqCst);
        let inbox = self.inbox.as_ref().ok_or(SearchError::WorkerGone)?;
        inbox
            .send(Request::Start { board, turn, en_passant, max_depth, request_id })
            .map_err(|_| SearchError::WorkerGone)?;
        debug!(request_id, "search queued");
        Ok(request_id)
    }

    /// Para a busca viva (se houver). A resposta final dela será `Stopped`.
    pub fn stop(&mut self) {
        self.latest.store(0, Ordering::SeqCst);
        self.stop.store(true, Ordering::SeqCst);
        if let Some(request_id) = self.tracker.cancel() {
            debug!(request_id, "search cancelled");
        }
    }

    pub fn live_request(&self) -> Option<u64> {
        self.tracker.live()
    }

    /// Canal de respostas, para quem quiser esperar com `select!`
    pub fn responses(&self) -> Receiver<Response> {
        self.responses.clone()
    }

    /// Próxima resposta de qualquer pedido, incluindo respostas antigas.
    pub fn recv_raw(&self) -> Result<Response, SearchError> {
        self.responses.recv().map_err(|_| SearchError::WorkerGone)
    }

    /// Próxima resposta do pedido vivo; respostas antigas são descartadas.
    /// `Ok(None)` quando o tempo acaba.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Response>, SearchError> {
        loop {
            match self.responses.recv_timeout(timeout) {
                Ok(response) if self.tracker.accept(&response) => return Ok(Some(response)),
                Ok(stale) => debug!(request_id = stale.request_id(), "stale response dropped"),
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(SearchError::WorkerGone),
            }
        }
    }

    /// Bloqueia até à resposta final do pedido vivo.
    pub fn wait(&mut self) -> Result<Response, SearchError> {
        loop {
            let response = self.recv_raw()?;
            if self.tracker.accept(&response) && response.is_terminal() {
                return Ok(response);
            }
        }
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.inbox.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(
    config: SearchConfig,
    requests: Receiver<Request>,
    outbox: Sender<Response>,
    stop: Arc<AtomicBool>,
    latest: Arc<AtomicU64>,
) {
    let mut engine = Engine::with_stop(config, Arc::clone(&stop));
    info!("search worker started");

    let emit = |response: Response| {
        let _ = outbox.send(response);
    };
    for request in requests.iter() {
        match request {
            Request::Start { board, turn, en_passant, max_depth, request_id } => {
                // Rearma antes de ler `latest`: um stop posterior nunca se perde
                engine.reset_stop();
                if latest.load(Ordering::SeqCst) != request_id {
                    emit(Response::Stopped { request_id });
                    continue;
                }
                run_search(&mut engine, &board, turn, en_passant, max_depth, request_id, emit);
            }
            stop @ Request::Stop { .. } => request_best_move(&mut engine, stop, emit),
        }
    }

    info!("search worker finished");
}

//! Network actor - runs API calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that executes API commands, one task per request
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.dispatch(cmd),
                    }
                }

                // Reap completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Request task panicked or was aborted");
                    }
                }
            }
        }

        self.active_requests.shutdown().await;
    }

    fn dispatch(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            let response = match cmd {
                NetworkCommand::ListProperties { id } => {
                    tracing::info!(id, url = %client.properties_url(), "Fetching properties");
                    NetworkResponse::Properties {
                        id,
                        result: client.list_properties().await,
                    }
                }
                NetworkCommand::GetProperty { id, property_id } => {
                    tracing::info!(id, property_id = %property_id, "Fetching property");
                    let result = client.get_property(&property_id).await;
                    NetworkResponse::Property {
                        id,
                        property_id,
                        result,
                    }
                }
                NetworkCommand::SubmitContact { id, payload } => {
                    tracing::info!(id, url = %client.contact_url(), "Submitting contact form");
                    NetworkResponse::ContactSubmitted {
                        id,
                        result: client.submit_contact(&payload).await,
                    }
                }
                NetworkCommand::Shutdown => return,
            };

            tracing::info!(id = response.id(), ok = response.is_ok(), "Request completed");
            if response_tx.send(response).is_err() {
                tracing::debug!("App layer gone, dropping response");
            }
        });
    }
}

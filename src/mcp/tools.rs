use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde_json::Value;

use crate::mcp::encryption;
use crate::mcp::protocol::{CallToolResult, Tool};
use crate::mcp::schemas;
use crate::wallet::{Wallet, WalletResult};

/// The closed set of tool names this server exposes. Dispatch is keyed by
/// this enum, so an unknown or misspelled name is a parse failure at the
/// framework boundary, never a stringly-typed runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetPublicKey,
    CreateSignature,
    VerifySignature,
    Encryption,
    ListActions,
    ListOutputs,
    GetNetwork,
    GetVersion,
    RevealCounterpartyKeyLinkage,
    RevealSpecificKeyLinkage,
    CreateHmac,
    VerifyHmac,
    AbortAction,
    InternalizeAction,
    RelinquishOutput,
    AcquireCertificate,
    ListCertificates,
    ProveCertificate,
    RelinquishCertificate,
    DiscoverByIdentityKey,
    DiscoverByAttributes,
    IsAuthenticated,
    WaitForAuthentication,
    GetHeaderForHeight,
    GetAddress,
    SendToAddress,
    PurchaseListing,
    CreateOrdinals,
}

impl ToolName {
    pub const ALL: [ToolName; 28] = [
        ToolName::GetPublicKey,
        ToolName::CreateSignature,
        ToolName::VerifySignature,
        ToolName::Encryption,
        ToolName::ListActions,
        ToolName::ListOutputs,
        ToolName::GetNetwork,
        ToolName::GetVersion,
        ToolName::RevealCounterpartyKeyLinkage,
        ToolName::RevealSpecificKeyLinkage,
        ToolName::CreateHmac,
        ToolName::VerifyHmac,
        ToolName::AbortAction,
        ToolName::InternalizeAction,
        ToolName::RelinquishOutput,
        ToolName::AcquireCertificate,
        ToolName::ListCertificates,
        ToolName::ProveCertificate,
        ToolName::RelinquishCertificate,
        ToolName::DiscoverByIdentityKey,
        ToolName::DiscoverByAttributes,
        ToolName::IsAuthenticated,
        ToolName::WaitForAuthentication,
        ToolName::GetHeaderForHeight,
        ToolName::GetAddress,
        ToolName::SendToAddress,
        ToolName::PurchaseListing,
        ToolName::CreateOrdinals,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ToolName::GetPublicKey => "wallet_getPublicKey",
            ToolName::CreateSignature => "wallet_createSignature",
            ToolName::VerifySignature => "wallet_verifySignature",
            ToolName::Encryption => "wallet_encryption",
            ToolName::ListActions => "wallet_listActions",
            ToolName::ListOutputs => "wallet_listOutputs",
            ToolName::GetNetwork => "wallet_getNetwork",
            ToolName::GetVersion => "wallet_getVersion",
            ToolName::RevealCounterpartyKeyLinkage => "wallet_revealCounterpartyKeyLinkage",
            ToolName::RevealSpecificKeyLinkage => "wallet_revealSpecificKeyLinkage",
            ToolName::CreateHmac => "wallet_createHmac",
            ToolName::VerifyHmac => "wallet_verifyHmac",
            ToolName::AbortAction => "wallet_abortAction",
            ToolName::InternalizeAction => "wallet_internalizeAction",
            ToolName::RelinquishOutput => "wallet_relinquishOutput",
            ToolName::AcquireCertificate => "wallet_acquireCertificate",
            ToolName::ListCertificates => "wallet_listCertificates",
            ToolName::ProveCertificate => "wallet_proveCertificate",
            ToolName::RelinquishCertificate => "wallet_relinquishCertificate",
            ToolName::DiscoverByIdentityKey => "wallet_discoverByIdentityKey",
            ToolName::DiscoverByAttributes => "wallet_discoverByAttributes",
            ToolName::IsAuthenticated => "wallet_isAuthenticated",
            ToolName::WaitForAuthentication => "wallet_waitForAuthentication",
            ToolName::GetHeaderForHeight => "wallet_getHeaderForHeight",
            ToolName::GetAddress => "wallet_getAddress",
            ToolName::SendToAddress => "wallet_sendToAddress",
            ToolName::PurchaseListing => "wallet_purchaseListing",
            ToolName::CreateOrdinals => "wallet_createOrdinals",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

/// Opaque per-call context handed to every handler. Carried for the
/// transport's benefit; no adapter inspects it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: Value,
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = CallToolResult> + Send>>;

/// A registered handler: a total function from validated arguments to a
/// response envelope. Failures surface as `isError` envelopes, never as a
/// propagated error.
pub type ToolHandler = Arc<dyn Fn(Value, RequestContext) -> HandlerFuture + Send + Sync>;

/// Binds tool names to (descriptor, handler) pairs and exposes the handlers
/// for direct in-process invocation.
pub struct ToolRegistry {
    tools: Vec<Tool>,
    handlers: HashMap<ToolName, ToolHandler>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Registers a tool descriptor and its handler. Registering the same
    /// name twice is a startup error.
    pub fn register(
        &mut self,
        name: ToolName,
        description: &str,
        input_schema: Value,
        handler: ToolHandler,
    ) -> Result<()> {
        if self.handlers.contains_key(&name) {
            bail!("Tool '{}' is already registered", name.as_str());
        }
        self.tools.push(Tool {
            name: name.as_str().into(),
            description: description.into(),
            input_schema,
        });
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Descriptors for `tools/list`, in registration order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn handler(&self, name: ToolName) -> Option<&ToolHandler> {
        self.handlers.get(&name)
    }

    /// Invokes a registered handler directly, bypassing the transport.
    pub async fn call(&self, name: ToolName, args: Value, extra: RequestContext) -> CallToolResult {
        match self.handlers.get(&name) {
            Some(handler) => handler(args, extra).await,
            None => CallToolResult::error(format!("Tool not registered: {}", name.as_str())),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a single wallet capability call in the catch-to-envelope pattern
/// every simple adapter shares: validated arguments go to the wallet
/// unchanged, a success value is serialized to one text block, and any
/// wallet failure becomes the envelope's error text.
fn forward<F>(wallet: &Arc<dyn Wallet>, op: F) -> ToolHandler
where
    F: Fn(Arc<dyn Wallet>, Value) -> Pin<Box<dyn Future<Output = WalletResult> + Send>>
        + Send
        + Sync
        + 'static,
{
    let wallet = Arc::clone(wallet);
    Arc::new(move |args, _extra| {
        let fut = op(Arc::clone(&wallet), args);
        Box::pin(async move {
            match fut.await {
                Ok(result) => CallToolResult::text(result.to_string()),
                Err(err) => CallToolResult::error(err.to_string()),
            }
        })
    })
}

/// Registers the full wallet tool set and returns the completed registry so
/// callers (the stdio server, or an in-process harness) can invoke handlers
/// without going through the transport.
pub fn register_wallet_tools(wallet: Arc<dyn Wallet>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(
        ToolName::GetPublicKey,
        "Retrieves the current wallet's public key. This public key can be used for \
         cryptographic operations like signature verification or encryption.",
        schemas::get_public_key_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.get_public_key(args).await })
        }),
    )?;

    registry.register(
        ToolName::CreateSignature,
        "Creates a cryptographic signature using the wallet's private key. This tool \
         enables secure message signing and transaction authorization, supporting \
         various signature protocols.",
        schemas::create_signature_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.create_signature(args).await })
        }),
    )?;

    registry.register(
        ToolName::VerifySignature,
        "Verifies a cryptographic signature against a message or data. This tool \
         supports various verification protocols and can validate signatures from \
         both the wallet's own keys and external public keys.",
        schemas::verify_signature_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.verify_signature(args).await })
        }),
    )?;

    registry.register(
        ToolName::Encryption,
        encryption::DESCRIPTION,
        schemas::encryption_args(),
        encryption::handler(&wallet),
    )?;

    registry.register(
        ToolName::ListActions,
        "Lists actions (transactions) the wallet has created or participated in, \
         optionally filtered by label.",
        schemas::list_actions_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.list_actions(args).await })
        }),
    )?;

    registry.register(
        ToolName::ListOutputs,
        "Lists spendable outputs held in one of the wallet's output baskets.",
        schemas::list_outputs_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.list_outputs(args).await })
        }),
    )?;

    registry.register(
        ToolName::GetNetwork,
        "Returns which network the wallet operates on (mainnet or testnet).",
        schemas::empty_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.get_network(args).await })
        }),
    )?;

    registry.register(
        ToolName::GetVersion,
        "Returns the wallet's version string.",
        schemas::empty_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.get_version(args).await })
        }),
    )?;

    registry.register(
        ToolName::RevealCounterpartyKeyLinkage,
        "Reveals the key linkage between the wallet and a counterparty, encrypted \
         for a designated verifier.",
        schemas::reveal_counterparty_key_linkage_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.reveal_counterparty_key_linkage(args).await })
        }),
    )?;

    registry.register(
        ToolName::RevealSpecificKeyLinkage,
        "Reveals the linkage of one specific protocol/key pair with a counterparty, \
         encrypted for a designated verifier.",
        schemas::reveal_specific_key_linkage_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.reveal_specific_key_linkage(args).await })
        }),
    )?;

    registry.register(
        ToolName::CreateHmac,
        "Creates an HMAC over the supplied data using a wallet-derived key.",
        schemas::create_hmac_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.create_hmac(args).await })
        }),
    )?;

    registry.register(
        ToolName::VerifyHmac,
        "Verifies an HMAC over the supplied data against a wallet-derived key.",
        schemas::verify_hmac_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.verify_hmac(args).await })
        }),
    )?;

    registry.register(
        ToolName::AbortAction,
        "Aborts an in-progress action identified by its reference.",
        schemas::abort_action_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.abort_action(args).await })
        }),
    )?;

    registry.register(
        ToolName::InternalizeAction,
        "Internalizes outputs of an externally created transaction into the wallet.",
        schemas::internalize_action_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.internalize_action(args).await })
        }),
    )?;

    registry.register(
        ToolName::RelinquishOutput,
        "Removes an output from one of the wallet's baskets without spending it.",
        schemas::relinquish_output_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.relinquish_output(args).await })
        }),
    )?;

    registry.register(
        ToolName::AcquireCertificate,
        "Acquires an identity certificate from a certifier.",
        schemas::acquire_certificate_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.acquire_certificate(args).await })
        }),
    )?;

    registry.register(
        ToolName::ListCertificates,
        "Lists identity certificates held by the wallet, filtered by certifier and type.",
        schemas::list_certificates_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.list_certificates(args).await })
        }),
    )?;

    registry.register(
        ToolName::ProveCertificate,
        "Proves selected fields of an identity certificate to a verifier.",
        schemas::prove_certificate_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.prove_certificate(args).await })
        }),
    )?;

    registry.register(
        ToolName::RelinquishCertificate,
        "Relinquishes an identity certificate held by the wallet.",
        schemas::relinquish_certificate_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.relinquish_certificate(args).await })
        }),
    )?;

    registry.register(
        ToolName::DiscoverByIdentityKey,
        "Discovers certified identity information by identity key.",
        schemas::discover_by_identity_key_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.discover_by_identity_key(args).await })
        }),
    )?;

    registry.register(
        ToolName::DiscoverByAttributes,
        "Discovers certified identity information matching a set of attributes.",
        schemas::discover_by_attributes_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.discover_by_attributes(args).await })
        }),
    )?;

    registry.register(
        ToolName::IsAuthenticated,
        "Reports whether the wallet is currently authenticated.",
        schemas::empty_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.is_authenticated(args).await })
        }),
    )?;

    registry.register(
        ToolName::WaitForAuthentication,
        "Waits until the wallet becomes authenticated, then returns.",
        schemas::empty_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.wait_for_authentication(args).await })
        }),
    )?;

    registry.register(
        ToolName::GetHeaderForHeight,
        "Returns the serialized block header at the given height.",
        schemas::get_header_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.get_header_for_height(args).await })
        }),
    )?;

    registry.register(
        ToolName::GetAddress,
        "Returns the wallet's receive address.",
        schemas::empty_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.get_address(args).await })
        }),
    )?;

    registry.register(
        ToolName::SendToAddress,
        "Sends satoshis from the wallet to an address.",
        schemas::send_to_address_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.send_to_address(args).await })
        }),
    )?;

    registry.register(
        ToolName::PurchaseListing,
        "Purchases a marketplace listing using wallet funds.",
        schemas::purchase_listing_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.purchase_listing(args).await })
        }),
    )?;

    registry.register(
        ToolName::CreateOrdinals,
        "Creates ordinal inscriptions from the supplied content.",
        schemas::create_ordinals_args(),
        forward(&wallet, |w, args| {
            Box::pin(async move { w.create_ordinals(args).await })
        }),
    )?;

    Ok(registry)
}

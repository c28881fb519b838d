use serde_json::Value;

use super::{Dispatcher, Operation, Params, Result, build_params};

/// One pending invocation of a table [`Operation`].
///
/// ```no_run
/// # async fn f(client: &utopia_api::Client) -> utopia_api::Result<()> {
/// client
///     .call("set_contact_nick")?
///     .arg("pk", "A1B2")
///     .arg("new_nick", "Bob")
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct Call<'a> {
    dispatcher: &'a Dispatcher,
    operation: &'static Operation,
    args: Params,
}

impl<'a> Call<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher, operation: &'static Operation) -> Self {
        Self {
            dispatcher,
            operation,
            args: Params::new(),
        }
    }

    pub fn operation(&self) -> &'static Operation {
        self.operation
    }

    pub fn arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(name.to_string(), value.into());
        self
    }

    pub fn args(mut self, args: Params) -> Self {
        self.args.extend(args);
        self
    }

    /// The `params` object this call would send.
    pub fn params(&self) -> Result<Params> {
        build_params(self.operation, self.args.clone())
    }

    pub async fn send(self) -> Result<Value> {
        let params = build_params(self.operation, self.args)?;
        Ok(self
            .dispatcher
            .send(Some(self.operation.method), Some(params))
            .await?)
    }
}

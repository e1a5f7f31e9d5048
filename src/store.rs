//! Dependency container for one invocation
//!
//! A `Store` binds the parsed arguments to the storage strategy, the output
//! printer, and the prompter. It can only be obtained through
//! `StoreBuilder::build`, which refuses to produce a half-initialised value.

use std::sync::Arc;

use crate::backend::DbConnection;
use crate::configuration::Configuration;
use crate::errors::{AppError, AppResult};
use crate::fields::ConfigFields;
use crate::output::Print;
use crate::prompt::Prompter;
use crate::routing::ParsedArgs;
use crate::strategies::Strategy;

pub struct Store {
    args: ParsedArgs,
    conf: Arc<Configuration>,
    fields: Arc<dyn ConfigFields>,
    db: Arc<dyn DbConnection>,
    printer: Arc<dyn Print>,
    prompter: Arc<dyn Prompter>,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn args(&self) -> &ParsedArgs {
        &self.args
    }

    pub fn conf(&self) -> &Configuration {
        &self.conf
    }

    pub fn fields(&self) -> &dyn ConfigFields {
        self.fields.as_ref()
    }

    pub fn db(&self) -> &dyn DbConnection {
        self.db.as_ref()
    }

    pub fn printer(&self) -> &dyn Print {
        self.printer.as_ref()
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }
}

/// Builder for `Store`; every field is required
#[derive(Default)]
pub struct StoreBuilder {
    args: Option<ParsedArgs>,
    conf: Option<Arc<Configuration>>,
    fields: Option<Arc<dyn ConfigFields>>,
    db: Option<Arc<dyn DbConnection>>,
    printer: Option<Arc<dyn Print>>,
    prompter: Option<Arc<dyn Prompter>>,
}

impl StoreBuilder {
    pub fn args(mut self, args: ParsedArgs) -> Self {
        self.args = Some(args);
        self
    }

    pub fn conf(mut self, conf: Arc<Configuration>) -> Self {
        self.conf = Some(conf);
        self
    }

    pub fn fields(mut self, fields: Arc<dyn ConfigFields>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn db(mut self, db: Arc<dyn DbConnection>) -> Self {
        self.db = Some(db);
        self
    }

    pub fn printer(mut self, printer: Arc<dyn Print>) -> Self {
        self.printer = Some(printer);
        self
    }

    pub fn prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    /// Take the configuration, fields, and connection of a storage strategy
    pub fn strategy(self, strategy: Strategy) -> Self {
        self.conf(strategy.conf).fields(strategy.fields).db(strategy.db)
    }

    pub fn build(self) -> AppResult<Store> {
        fn require<T>(value: Option<T>, field: &'static str) -> AppResult<T> {
            value.ok_or(AppError::MissingDependency { field })
        }

        Ok(Store {
            args: require(self.args, "args")?,
            conf: require(self.conf, "conf")?,
            fields: require(self.fields, "fields")?,
            db: require(self.db, "db")?,
            printer: require(self.printer, "printer")?,
            prompter: require(self.prompter, "prompter")?,
        })
    }
}

// HTTP Invocation Client
//
// Production implementation of the InvocationClient capability over the
// Lambda-style REST API: invocations with log-tail capture, and function
// configuration lookups for endpoint metadata.

mod client;


pub use client::HttpInvocationClient;

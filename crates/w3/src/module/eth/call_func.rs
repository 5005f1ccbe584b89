use w3_abi::{FromToken, Func, Token};
use w3_primitives::Address;

use crate::args::{block_number_arg, to_call_arg, to_overrides_arg};
use crate::caller::{Caller, Request, Response};
use crate::codec;
use crate::types::{BlockNumber, Message, State};
use crate::Error;

/// eth_call of a contract function, decoding the return values.
///
/// ```rust,ignore
/// let balance_of = Func::new("balanceOf(address)", "uint256")?;
/// let mut balance = U256::zero();
/// client
///     .call_one(
///         eth::call_func(balance_of, weth, vec![Token::Address(owner)])
///             .at_block(BlockNumber::Number(15_000_000))
///             .returns(&mut balance),
///     )
///     .await?;
/// ```
pub fn call_func(func: Func, contract: Address, args: Vec<Token>) -> CallFuncFactory {
    CallFuncFactory {
        func,
        contract,
        args,
        from: None,
        block: None,
        overrides: State::new(),
    }
}

/// Builder for a contract function call
#[derive(Debug, Clone)]
pub struct CallFuncFactory {
    func: Func,
    contract: Address,
    args: Vec<Token>,
    from: Option<Address>,
    block: Option<BlockNumber>,
    overrides: State,
}

impl CallFuncFactory {
    /// Execute against the state at `block` instead of the latest block
    pub fn at_block(mut self, block: BlockNumber) -> Self {
        self.block = Some(block);
        self
    }

    /// Apply state overrides for the duration of the call
    pub fn overrides(mut self, overrides: State) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the sender
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Build the request element, encoding the arguments
    pub fn create_request(&self) -> Result<Request, Error> {
        let mut msg = Message::new(self.contract).func(self.func.clone(), self.args.clone());
        msg.from = self.from;

        let mut params = vec![to_call_arg(&msg.resolve()?), block_number_arg(self.block)];
        if let Some(overrides) = to_overrides_arg(&self.overrides) {
            params.push(overrides);
        }
        Ok(Request::new("eth_call", params))
    }

    /// Decode the return values into `dest`.
    ///
    /// A function with several return values decodes into a tuple.
    pub fn returns<T: FromToken + Send>(self, dest: &mut T) -> CallFuncCaller<'_, T> {
        CallFuncCaller {
            factory: self,
            dest,
        }
    }
}

/// A [`CallFuncFactory`] bound to its destination
#[derive(Debug)]
pub struct CallFuncCaller<'a, T> {
    factory: CallFuncFactory,
    dest: &'a mut T,
}

impl<T: FromToken + Send> Caller for CallFuncCaller<'_, T> {
    fn create_request(&self) -> Result<Request, Error> {
        self.factory.create_request()
    }

    fn handle_response(self: Box<Self>, response: Response) -> Result<(), Error> {
        let CallFuncCaller { factory, dest } = *self;
        let output = codec::bytes_from_value("result", &response.into_result()?)?;
        *dest = factory.func.decode_returns(&output)?;
        Ok(())
    }
}

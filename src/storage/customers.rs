use chrono::NaiveDateTime;
use std::rc::Rc;
use tracing::{info, warn};

use crate::application::{AppError, CustomerSummary};
use crate::domain::{Customer, CustomerId, IdSequence, NewCustomer};

/// Capacity-bounded registry of customers in registration order.
pub struct CustomerManager {
    customers: Vec<Rc<Customer>>,
    capacity: usize,
    ids: IdSequence,
}

impl CustomerManager {
    pub const REGISTRY: &'static str = "Customer";

    pub fn new(capacity: usize, ids: IdSequence) -> Self {
        Self {
            customers: Vec::new(),
            capacity,
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.customers.len() < self.capacity
    }

    pub fn ensure_capacity(&self) -> Result<(), AppError> {
        if self.has_capacity() {
            return Ok(());
        }
        warn!(capacity = self.capacity, "Customer limit reached");
        Err(AppError::CapacityExceeded {
            registry: Self::REGISTRY,
            capacity: self.capacity,
        })
    }

    pub fn register(
        &mut self,
        details: NewCustomer,
        registered_at: NaiveDateTime,
    ) -> Result<Rc<Customer>, AppError> {
        if let Some(problem) = details.problem() {
            return Err(AppError::InvalidCustomer(problem));
        }
        self.ensure_capacity()?;

        let id = CustomerId::new(self.ids.next_value());
        let customer = Rc::new(Customer::new(id, details, registered_at));
        info!(customer = %customer.id, tier = customer.tier.as_str(), "Customer added");
        self.customers.push(Rc::clone(&customer));
        Ok(customer)
    }

    pub fn find_customer(&self, id: &CustomerId) -> Result<Rc<Customer>, AppError> {
        self.customers
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| AppError::CustomerNotFound(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter().map(|c| c.as_ref())
    }

    pub fn summaries(&self) -> Vec<CustomerSummary> {
        self.iter().map(CustomerSummary::from_customer).collect()
    }
}

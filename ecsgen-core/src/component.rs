//! Traits implemented by generated schema code.
//!
//! Generated code implements:
//! - [`SchemaData`] for every schema type (plain struct or component data)
//! - [`Component`] for every component read struct
//! - [`ComponentData`] for every type promoted to a component's data type
//! - [`ComponentUpdate`] for every component update struct
//! - [`Command`] for every command marker
//! - [`AnyComponentData`] / [`AnyComponentUpdate`] for the root enums
//! - [`GeneratedSchema`] for the root `Schema` marker

use crate::error::{Error, Result};
use crate::object::SchemaObject;
use crate::payload::{
    SchemaCommandRequest, SchemaCommandResponse, SchemaComponentData, SchemaComponentUpdate,
};
use crate::types::{CommandIndex, ComponentId};
use std::any::Any;

/// A schema type that reads from and writes to a [`SchemaObject`].
pub trait SchemaData: Sized {
    /// Builds a value by reading every field from `object`.
    fn deserialize(object: &SchemaObject) -> Self;

    /// Writes every field into `object`.
    fn serialize(&self, object: &mut SchemaObject);
}

/// A component read struct.
pub trait Component: Sized + 'static {
    /// Globally unique component id.
    const ID: ComponentId;

    /// Change-tracked data type of the component.
    type Data: ComponentData<Component = Self>;

    /// Delta carrier of the component.
    type Update: ComponentUpdate<Component = Self>;

    /// Converts the read struct into fresh component data.
    fn into_data(self) -> Self::Data;

    /// Serializes the read struct as full component data.
    fn into_snapshot(self) -> SchemaComponentData {
        self.into_data().serialize_data()
    }
}

/// Change-tracked data of one component.
pub trait ComponentData: SchemaData {
    /// Owning component.
    type Component: Component;

    /// Reads full component data.
    ///
    /// # Errors
    /// Returns [`Error::ComponentMismatch`] if the payload is addressed to
    /// another component.
    fn deserialize_data(data: &SchemaComponentData) -> Result<Self> {
        check_component(<Self::Component as Component>::ID, data.component_id)?;
        Ok(Self::deserialize(&data.fields))
    }

    /// Writes full component data.
    fn serialize_data(&self) -> SchemaComponentData {
        let mut data = SchemaComponentData::new(<Self::Component as Component>::ID);
        self.serialize(&mut data.fields);
        data
    }

    /// Applies every set field and appends every event of the update.
    fn apply_update(&mut self, update: &<Self::Component as Component>::Update);

    /// Returns true if any field is dirty or any event is staged.
    fn has_pending_changes(&self) -> bool;

    /// Serializes dirty fields and staged events, then clears both.
    fn flush_update(&mut self) -> SchemaComponentUpdate;

    /// Sets the aggregate dirty flag.
    fn make_dirty(&mut self);

    /// Returns the aggregate dirty flag and clears it.
    fn take_dirty(&mut self) -> bool;

    /// Drops events received during the current cycle.
    fn cleanup_after_frame(&mut self);
}

/// Delta carrier of one component.
pub trait ComponentUpdate: Default + Clone {
    /// Owning component.
    type Component: Component;

    /// Reads the fields and events present in `update`.
    fn read_update(update: &SchemaComponentUpdate) -> Self;

    /// Writes the fields and events present in `self`.
    fn write_update(&self, update: &mut SchemaComponentUpdate);

    /// Returns true if the update carries at least one event.
    fn contains_events(&self) -> bool;

    /// Reads an update addressed to this component.
    ///
    /// # Errors
    /// Returns [`Error::ComponentMismatch`] if the payload is addressed to
    /// another component.
    fn deserialize_update(update: &SchemaComponentUpdate) -> Result<Self> {
        check_component(<Self::Component as Component>::ID, update.component_id)?;
        Ok(Self::read_update(update))
    }

    /// Writes the update keyed by the component id.
    fn serialize_update(&self) -> SchemaComponentUpdate {
        let mut update = SchemaComponentUpdate::new(<Self::Component as Component>::ID);
        self.write_update(&mut update);
        update
    }
}

/// A component command, addressed by (component id, command index).
pub trait Command {
    /// Component owning the command.
    type Component: Component;

    /// Request shape.
    type Request: SchemaData;

    /// Response shape.
    type Response: SchemaData;

    /// Command index within the component.
    const COMMAND_INDEX: CommandIndex;

    /// Serializes a request addressed to this command.
    fn serialize_request(request: &Self::Request) -> SchemaCommandRequest {
        let mut payload =
            SchemaCommandRequest::new(<Self::Component as Component>::ID, Self::COMMAND_INDEX);
        request.serialize(&mut payload.object);
        payload
    }

    /// Deserializes a request addressed to this command.
    ///
    /// # Errors
    /// Returns [`Error::CommandMismatch`] if the request targets another command.
    fn deserialize_request(request: &SchemaCommandRequest) -> Result<Self::Request> {
        check_command::<Self>(request.component_id, request.command_index)?;
        Ok(Self::Request::deserialize(&request.object))
    }

    /// Serializes a response addressed to this command.
    fn serialize_response(response: &Self::Response) -> SchemaCommandResponse {
        let mut payload =
            SchemaCommandResponse::new(<Self::Component as Component>::ID, Self::COMMAND_INDEX);
        response.serialize(&mut payload.object);
        payload
    }

    /// Deserializes a response addressed to this command.
    ///
    /// # Errors
    /// Returns [`Error::CommandMismatch`] if the response targets another command.
    fn deserialize_response(response: &SchemaCommandResponse) -> Result<Self::Response> {
        check_command::<Self>(response.component_id, response.command_index)?;
        Ok(Self::Response::deserialize(&response.object))
    }
}

/// Sum of every generated component's data.
pub trait AnyComponentData: Sized {
    /// Matching update sum type.
    type Update: AnyComponentUpdate;

    /// Id of the wrapped component.
    fn component_id(&self) -> ComponentId;

    /// Dispatches on the payload's component id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownComponent`] if no component has the id.
    fn deserialize(data: &SchemaComponentData) -> Result<Self>;

    /// Serializes the wrapped data.
    fn serialize(&self) -> SchemaComponentData;

    /// Applies the update if it belongs to the same component; otherwise
    /// leaves the data untouched.
    fn apply_update(&mut self, update: &Self::Update);
}

/// Sum of every generated component's update.
pub trait AnyComponentUpdate: Sized {
    /// Id of the wrapped component.
    fn component_id(&self) -> ComponentId;

    /// Dispatches on the payload's component id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownComponent`] if no component has the id.
    fn deserialize(update: &SchemaComponentUpdate) -> Result<Self>;

    /// Serializes the wrapped update.
    fn serialize(&self) -> SchemaComponentUpdate;
}

/// Visitor receiving every generated component type.
pub trait ComponentRegistrar {
    /// Called once per component, in schema encounter order.
    fn register_component<C: Component>(&mut self);
}

/// Root of a generated schema.
pub trait GeneratedSchema: Sized + 'static {
    /// Number of generated components.
    const NUMBER_OF_COMPONENTS: usize;

    /// Sum of all component data.
    type ComponentData: AnyComponentData<Update = Self::ComponentUpdate>;

    /// Sum of all component updates.
    type ComponentUpdate: AnyComponentUpdate;

    /// Dense 0-based index of a component id, in encounter order.
    fn unique_index(component_id: ComponentId) -> Option<usize>;

    /// Deserializes a command request into the command's request type.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCommand`] if no command has the address.
    fn deserialize_command_request(request: &SchemaCommandRequest) -> Result<Box<dyn Any>>;

    /// Deserializes a command response into the command's response type.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCommand`] if no command has the address.
    fn deserialize_command_response(response: &SchemaCommandResponse) -> Result<Box<dyn Any>>;

    /// Visits every component type.
    fn register_components<R: ComponentRegistrar>(registrar: &mut R);
}

fn check_component(expected: ComponentId, actual: ComponentId) -> Result<()> {
    if expected != actual {
        return Err(Error::ComponentMismatch { expected, actual });
    }
    Ok(())
}

fn check_command<C: Command + ?Sized>(component_id: ComponentId, index: CommandIndex) -> Result<()> {
    let expected_component = <C::Component as Component>::ID;
    if component_id != expected_component || index != C::COMMAND_INDEX {
        return Err(Error::CommandMismatch {
            expected_component,
            expected_index: C::COMMAND_INDEX,
            actual_component: component_id,
            actual_index: index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventQueue;
    use crate::property::Property;

    // Hand-written equivalent of the code generated for:
    // type Counter { uint32 value = 1; } component CounterComponent { id = 7; event Ping ping; }
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Ping {
        n: u32,
    }

    impl SchemaData for Ping {
        fn deserialize(object: &SchemaObject) -> Self {
            Self {
                n: object.index_uint32(1, 0),
            }
        }

        fn serialize(&self, object: &mut SchemaObject) {
            object.add_uint32(1, self.n);
        }
    }

    #[derive(Debug, Clone, Default)]
    struct CounterData {
        value: Property<u32>,
        is_dirty: bool,
        ping: EventQueue<Ping>,
    }

    impl SchemaData for CounterData {
        fn deserialize(object: &SchemaObject) -> Self {
            Self {
                value: Property::new(object.index_uint32(1, 0)),
                is_dirty: false,
                ping: EventQueue::new(),
            }
        }

        fn serialize(&self, object: &mut SchemaObject) {
            object.add_uint32(1, *self.value);
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug, Clone, Default)]
    struct CounterUpdate {
        value: Option<u32>,
        ping: Vec<Ping>,
    }

    impl Component for Counter {
        const ID: ComponentId = 7;
        type Data = CounterData;
        type Update = CounterUpdate;

        fn into_data(self) -> CounterData {
            CounterData {
                value: self.value.into(),
                is_dirty: false,
                ping: EventQueue::new(),
            }
        }
    }

    impl ComponentData for CounterData {
        type Component = Counter;

        fn apply_update(&mut self, update: &CounterUpdate) {
            if let Some(value) = &update.value {
                self.value = Property::new(*value);
            }
            for event in &update.ping {
                self.ping.add_event(event.clone());
            }
        }

        fn has_pending_changes(&self) -> bool {
            self.value.is_dirty() || self.ping.has_staged()
        }

        fn flush_update(&mut self) -> SchemaComponentUpdate {
            let mut update = SchemaComponentUpdate::new(Counter::ID);
            if self.value.take_dirty() {
                update.fields.add_uint32(1, *self.value);
            }
            for event in self.ping.staged() {
                event.serialize(update.events.add_object(1));
            }
            self.ping.clear_staged();
            update
        }

        fn make_dirty(&mut self) {
            self.is_dirty = true;
        }

        fn take_dirty(&mut self) -> bool {
            std::mem::take(&mut self.is_dirty)
        }

        fn cleanup_after_frame(&mut self) {
            self.ping.clear();
        }
    }

    impl ComponentUpdate for CounterUpdate {
        type Component = Counter;

        fn read_update(update: &SchemaComponentUpdate) -> Self {
            Self {
                value: (update.fields.uint32_count(1) > 0).then(|| update.fields.index_uint32(1, 0)),
                ping: (0..update.events.object_count(1))
                    .map(|i| Ping::deserialize(update.events.index_object(1, i)))
                    .collect(),
            }
        }

        fn write_update(&self, update: &mut SchemaComponentUpdate) {
            if let Some(value) = &self.value {
                update.fields.add_uint32(1, *value);
            }
            for event in &self.ping {
                event.serialize(update.events.add_object(1));
            }
        }

        fn contains_events(&self) -> bool {
            !self.ping.is_empty()
        }
    }

    struct Reset;

    impl Command for Reset {
        type Component = Counter;
        type Request = Ping;
        type Response = Ping;
        const COMMAND_INDEX: CommandIndex = 1;
    }

    #[test]
    fn test_snapshot_carries_component_id() {
        let snapshot = Counter { value: 3 }.into_snapshot();
        assert_eq!(snapshot.component_id, 7);
        let data = CounterData::deserialize_data(&snapshot).unwrap();
        assert_eq!(*data.value, 3);
        assert!(!data.value.is_dirty());
    }

    #[test]
    fn test_deserialize_data_rejects_other_component() {
        let data = SchemaComponentData::new(8);
        assert_eq!(
            CounterData::deserialize_data(&data).unwrap_err(),
            Error::ComponentMismatch {
                expected: 7,
                actual: 8
            }
        );
    }

    #[test]
    fn test_flush_emits_dirty_field_once() {
        let mut data = Counter { value: 1 }.into_data();
        assert!(data.has_pending_changes());

        let first = data.flush_update();
        assert_eq!(first.fields.uint32_count(1), 1);
        assert!(!data.has_pending_changes());

        let second = data.flush_update();
        assert!(second.is_empty());
    }

    #[test]
    fn test_update_round_trip_and_apply() {
        let update = CounterUpdate {
            value: Some(9),
            ping: vec![Ping { n: 1 }, Ping { n: 2 }],
        };
        assert!(update.contains_events());
        let decoded = CounterUpdate::deserialize_update(&update.serialize_update()).unwrap();

        let mut data = CounterData::default();
        data.apply_update(&decoded);
        data.apply_update(&decoded);
        assert_eq!(*data.value, 9);
        assert!(!data.value.is_dirty());
        assert_eq!(data.ping.len(), 4);

        data.cleanup_after_frame();
        assert!(data.ping.is_empty());
    }

    #[test]
    fn test_make_and_take_dirty() {
        let mut data = CounterData::default();
        data.make_dirty();
        assert!(data.take_dirty());
        assert!(!data.take_dirty());
    }

    #[test]
    fn test_command_round_trip_and_mismatch() {
        let request = Reset::serialize_request(&Ping { n: 4 });
        assert_eq!((request.component_id, request.command_index), (7, 1));
        assert_eq!(Reset::deserialize_request(&request).unwrap(), Ping { n: 4 });

        let stray = SchemaCommandResponse::new(7, 2);
        assert_eq!(
            Reset::deserialize_response(&stray).unwrap_err(),
            Error::CommandMismatch {
                expected_component: 7,
                expected_index: 1,
                actual_component: 7,
                actual_index: 2,
            }
        );
    }
}

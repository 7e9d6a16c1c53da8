#[cfg(test)]
mod tests {
    use ivibench::{
        dcpwr::{
            DcPwrBase, DcPwrInitiate, DcPwrMeasurement, DcPwrSoftwareTrigger, DcPwrTrigger,
            MeasurementType, TriggerSource, agilente36xx::E36xxDriver,
        },
        error::IviError,
        session::LoopbackSession,
    };

    const IDN: &str = "Agilent Technologies,E3631A,0,2.1-5.0-1.0";

    fn supply(session: &LoopbackSession) -> E36xxDriver {
        E36xxDriver::new(session.clone(), false).unwrap()
    }

    #[test]
    fn test_three_named_outputs() {
        let session = LoopbackSession::new();
        let psu = supply(&session);

        assert_eq!(psu.output_count(), 3);
        let names: Vec<&str> = psu.channels().map(|c| c.name()).collect();
        assert_eq!(names, vec!["P6V", "P25V", "N25V"]);
        let indices: Vec<usize> = psu.channels().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(psu.channel_by_name("p25v").map(|c| c.index()), Some(1));
        assert!(session.exchanges().is_empty());
    }

    #[test]
    fn test_channel_selector_is_embedded() {
        let session = LoopbackSession::new().reply("INST:SEL P25V;:VOLT?", "+1.200000E+01");
        let psu = supply(&session);

        let p25v = psu.channel(1).unwrap();
        assert_eq!(p25v.voltage_level().unwrap(), 12.0);
        p25v.set_voltage_level(15.5).unwrap();
        psu.channel(2).unwrap().set_current_limit(0.5).unwrap();
        psu.channel(0).unwrap().set_output_enabled(false).unwrap();

        assert_eq!(session.queries(), vec!["INST:SEL P25V;:VOLT?"]);
        assert_eq!(
            session.writes(),
            vec![
                "INST:SEL P25V;:VOLT 15.5",
                "INST:SEL N25V;:CURR 0.5",
                "INST:SEL P6V;:OUTP OFF",
            ]
        );
    }

    #[test]
    fn test_configure_output_sets_voltage_then_current() {
        let session = LoopbackSession::new();
        let psu = supply(&session);

        psu.channel(0).unwrap().configure_output(5.0, 1.0).unwrap();

        assert_eq!(
            session.writes(),
            vec!["INST:SEL P6V;:VOLT 5", "INST:SEL P6V;:CURR 1"]
        );
    }

    #[test]
    fn test_invalid_channel_before_any_traffic() {
        let session = LoopbackSession::new();
        let psu = supply(&session);

        for index in [3, 4, usize::MAX] {
            match psu.channel(index) {
                Err(IviError::InvalidChannel { index: got, count }) => {
                    assert_eq!(got, index);
                    assert_eq!(count, 3);
                }
                _ => panic!("channel {} must be rejected", index),
            }
        }
        assert!(session.exchanges().is_empty());
    }

    #[test]
    fn test_measurement_passes_output_as_parameter() {
        let session = LoopbackSession::new()
            .reply("MEAS:VOLT? N25V", "-1.499870E+01")
            .reply("MEAS:CURR? N25V", "+2.000000E-03");
        let psu = supply(&session);
        let n25v = psu.channel(2).unwrap();

        assert_eq!(n25v.measure(MeasurementType::Voltage).unwrap(), -14.9987);
        assert_eq!(n25v.measure(MeasurementType::Current).unwrap(), 0.002);
    }

    #[test]
    fn test_trigger_configuration() {
        let session = LoopbackSession::new()
            .reply("INST:SEL P6V;:TRIG:SOUR?", "BUS")
            .reply("INST:SEL P6V;:VOLT:TRIG?", "+3.300000E+00");
        let psu = supply(&session);
        let p6v = psu.channel(0).unwrap();

        assert_eq!(p6v.trigger_source().unwrap(), TriggerSource::Software);
        assert_eq!(p6v.triggered_voltage_level().unwrap(), 3.3);
        p6v.set_trigger_source(TriggerSource::Immediate).unwrap();
        p6v.set_triggered_voltage_level(5.0).unwrap();
        p6v.set_triggered_current_limit(0.25).unwrap();
        psu.initiate().unwrap();
        psu.send_software_trigger().unwrap();

        assert_eq!(
            session.writes(),
            vec![
                "INST:SEL P6V;:TRIG:SOUR IMM",
                "INST:SEL P6V;:VOLT:TRIG 5",
                "INST:SEL P6V;:CURR:TRIG 0.25",
                "INIT",
                "*TRG",
            ]
        );
    }

    #[test]
    fn test_measurement_transport_error_propagates() {
        let session = LoopbackSession::new().fail("MEAS:VOLT? P6V", "bus fault");
        let psu = supply(&session);

        let result = psu.channel(0).unwrap().measure(MeasurementType::Voltage);

        assert!(matches!(result, Err(IviError::Transport(ref m)) if m == "bus fault"));
        assert_eq!(psu.output_count(), 3);
    }

    #[test]
    fn test_transport_errors_propagate_from_every_getter() {
        let session = LoopbackSession::new();
        let psu = supply(&session);
        session.disconnect("RS-232 link lost");

        for output in psu.channels() {
            let results = [
                output.voltage_level().map(|_| ()),
                output.current_limit().map(|_| ()),
                output.output_enabled().map(|_| ()),
                output.trigger_source().map(|_| ()),
                output.triggered_voltage_level().map(|_| ()),
                output.triggered_current_limit().map(|_| ()),
                output.measure(MeasurementType::Voltage).map(|_| ()),
                output.measure(MeasurementType::Current).map(|_| ()),
            ];

            for result in results {
                match result {
                    Err(IviError::Transport(message)) => assert_eq!(message, "RS-232 link lost"),
                    other => panic!("{}: expected transport error, got {:?}", output.name(), other),
                }
            }
        }
        assert!(matches!(psu.identify(), Err(IviError::Transport(_))));
        assert_eq!(psu.output_count(), 3);
    }

    #[test]
    fn test_unanswered_query_times_out() {
        let session = LoopbackSession::new();
        let psu = supply(&session);

        let err = psu.channel(0).unwrap().current_limit().unwrap_err();

        assert!(err.is_transport());
        assert!(matches!(err, IviError::Timeout { ref command, .. } if command == "INST:SEL P6V;:CURR?"));
    }

    #[test]
    fn test_identify() {
        let session = LoopbackSession::new().reply("*IDN?", IDN);
        let psu = supply(&session);

        let id = psu.identify().unwrap();

        assert_eq!(id.manufacturer, "Agilent Technologies");
        assert_eq!(id.model, "E3631A");
        assert_eq!(id.firmware_revision, "2.1-5.0-1.0");
    }

    #[test]
    fn test_verified_construction_checks_model() {
        let session = LoopbackSession::new().reply("*IDN?", IDN);
        let psu = E36xxDriver::new_verified(session.clone(), true).unwrap();
        assert_eq!(psu.output_count(), 3);
        assert_eq!(session.writes(), vec!["*RST"]);

        let session = LoopbackSession::new().reply("*IDN?", "Agilent Technologies,E3632A,0,1.0");
        match E36xxDriver::new_verified(session.clone(), true) {
            Err(IviError::UnsupportedModel { model, supported }) => {
                assert_eq!(model, "E3632A");
                assert_eq!(supported, vec!["E3631A"]);
            }
            _ => panic!("E3632A must be refused"),
        }
        assert!(session.writes().is_empty());
    }

    #[test]
    fn test_descriptor() {
        let psu = supply(&LoopbackSession::new());
        let descriptor = psu.descriptor();

        assert_eq!(descriptor.class_spec_major_version, 4);
        assert_eq!(descriptor.class_spec_minor_version, 4);
        assert_eq!(descriptor.class_spec_revision, "3.0");
        for group in [
            "IviDCPwrBase",
            "IviDCPwrTrigger",
            "IviDCPwrSoftwareTrigger",
            "IviDCPwrMeasurement",
        ] {
            assert!(descriptor.has_group(group), "{}", group);
        }
    }
}
